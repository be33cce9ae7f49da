//! 语义分析
//!
//! Works on the token streams of all translation units at once:
//!
//! 1. collect functions, constants, labels, locals and parameters into a
//!    [`SymbolTable`], rejecting redefinitions and a missing `main`;
//! 2. check that every referenced identifier is a builtin, a known module or
//!    a collected symbol.

pub mod builtins;
pub mod symbols;

pub use builtins::is_builtin;
pub use symbols::{qualify, Symbol, SymbolKind, SymbolTable};

use crate::frontend::error::SemanticError;
use crate::frontend::lexer::{Token, TokenKind};
use crate::frontend::TranslationUnit;

/// Entry point every program must define
pub const ENTRY_POINT: &str = "main";

/// Validate all units and return their symbols
pub fn analyze(units: &[TranslationUnit]) -> Result<SymbolTable, SemanticError> {
    let mut table = SymbolTable::new();

    for unit in units {
        if let Some(name) = &unit.module_name {
            table.add_module(name.clone());
        }
    }

    for unit in units {
        collect_symbols(unit, &mut table)?;
    }

    let has_entry = table
        .global(ENTRY_POINT)
        .map(|s| s.kind == SymbolKind::Function)
        .unwrap_or(false);
    if !has_entry {
        return Err(SemanticError::unlocated(format!(
            "undefined reference to '{}'",
            ENTRY_POINT
        )));
    }

    for unit in units {
        check_references(unit, &table)?;
    }

    tracing::debug!(
        "analysis passed: {} units, {} symbols",
        units.len(),
        table.len()
    );
    Ok(table)
}

fn kind_at(
    tokens: &[Token],
    index: Option<usize>,
) -> Option<TokenKind> {
    index.and_then(|i| tokens.get(i)).map(|t| t.kind)
}

/// Record a declaration, failing on a clash in the same scope
fn declare(
    table: &mut SymbolTable,
    unit: &TranslationUnit,
    kind: SymbolKind,
    name: String,
    scope: Option<String>,
    site: &Token,
) -> Result<(), SemanticError> {
    let symbol = Symbol {
        name,
        kind,
        filepath: unit.filepath.display().to_string(),
        line: site.line(),
        column: site.column(),
        scope,
        unit: unit.unit_name(),
    };
    tracing::trace!("symbol {} '{}'", kind, symbol.name);

    table.insert(symbol).map_err(|_| {
        SemanticError::at(
            format!("redefinition of {} '{}'", kind, site.literal),
            &unit.filepath,
            site.span,
        )
    })
}

/// First pass: declarations
fn collect_symbols(
    unit: &TranslationUnit,
    table: &mut SymbolTable,
) -> Result<(), SemanticError> {
    let tokens = &unit.tokens;
    let module = unit.module_name.as_deref();
    let mut function: Option<String> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let next = tokens.get(i + 1).filter(|t| t.is(TokenKind::Identifier));

        match (token.kind, next) {
            (TokenKind::FnSignature, Some(name)) => {
                let qualified = qualify(module, &name.literal);
                declare(table, unit, SymbolKind::Function, qualified.clone(), None, name)?;

                i += 2;
                if kind_at(tokens, Some(i)) == Some(TokenKind::LParen) {
                    i += 1;
                    while let Some(param) = tokens.get(i) {
                        match param.kind {
                            TokenKind::RParen | TokenKind::Eof => break,
                            TokenKind::Identifier => declare(
                                table,
                                unit,
                                SymbolKind::Parameter,
                                param.literal.clone(),
                                Some(qualified.clone()),
                                param,
                            )?,
                            _ => {}
                        }
                        i += 1;
                    }
                }
                function = Some(qualified);
            }
            (TokenKind::Const, Some(name)) => {
                let qualified = qualify(module, &name.literal);
                declare(table, unit, SymbolKind::Constant, qualified, None, name)?;
                i += 1;
            }
            (TokenKind::Local, Some(name)) => {
                if let Some(scope) = &function {
                    declare(
                        table,
                        unit,
                        SymbolKind::Local,
                        name.literal.clone(),
                        Some(scope.clone()),
                        name,
                    )?;
                }
                i += 1;
            }
            (TokenKind::Identifier, _)
                if kind_at(tokens, Some(i + 1)) == Some(TokenKind::Colon) =>
            {
                if let Some(scope) = &function {
                    declare(
                        table,
                        unit,
                        SymbolKind::Label,
                        token.literal.clone(),
                        Some(scope.clone()),
                        token,
                    )?;
                }
            }
            _ => {}
        }
        i += 1;
    }

    Ok(())
}

/// Second pass: every identifier use must resolve
fn check_references(
    unit: &TranslationUnit,
    table: &SymbolTable,
) -> Result<(), SemanticError> {
    let tokens = &unit.tokens;
    let module = unit.module_name.as_deref();
    let mut function: Option<String> = None;
    let mut in_params = false;

    for (i, token) in tokens.iter().enumerate() {
        let prev = kind_at(tokens, i.checked_sub(1));
        let next = kind_at(tokens, Some(i + 1));

        match token.kind {
            TokenKind::LParen => {
                in_params = kind_at(tokens, i.checked_sub(2)) == Some(TokenKind::FnSignature);
                continue;
            }
            TokenKind::RParen => {
                in_params = false;
                continue;
            }
            TokenKind::Identifier => {}
            _ => continue,
        }

        if prev == Some(TokenKind::FnSignature) {
            function = Some(qualify(module, &token.literal));
            continue;
        }
        let declaration_site = matches!(
            prev,
            Some(TokenKind::Const) | Some(TokenKind::Local) | Some(TokenKind::Reduce)
        );
        if in_params || declaration_site || next == Some(TokenKind::Colon) {
            continue;
        }

        if matches!(prev, Some(TokenKind::Jump(_))) {
            let label = function
                .as_deref()
                .and_then(|scope| table.scoped(scope, &token.literal))
                .filter(|symbol| symbol.kind == SymbolKind::Label);
            if label.is_none() {
                return Err(undefined(unit, token, &token.literal));
            }
            continue;
        }

        if next == Some(TokenKind::DoubleColon) {
            if !table.is_module(&token.literal) {
                return Err(undefined(unit, token, &token.literal));
            }
            continue;
        }

        let qualifier = if prev == Some(TokenKind::DoubleColon) {
            i.checked_sub(2)
                .and_then(|j| tokens.get(j))
                .map(|t| t.literal.as_str())
        } else {
            None
        };

        if qualifier.is_none() && (is_builtin(&token.literal) || table.is_module(&token.literal)) {
            continue;
        }

        if table
            .resolve(module, function.as_deref(), qualifier, &token.literal)
            .is_none()
        {
            return Err(undefined(unit, token, &qualify(qualifier, &token.literal)));
        }
    }

    Ok(())
}

fn undefined(
    unit: &TranslationUnit,
    token: &Token,
    name: &str,
) -> SemanticError {
    SemanticError::at(
        format!("undefined reference to '{}'", name),
        &unit.filepath,
        token.span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::module::Resolver;

    fn unit(
        path: &str,
        module_name: Option<&str>,
        source: &str,
    ) -> TranslationUnit {
        let mut unit = TranslationUnit::new(path, module_name.map(str::to_string));
        unit.compile(source.as_bytes(), &mut Resolver::new(vec![]))
            .unwrap();
        unit
    }

    fn analyze_one(source: &str) -> Result<SymbolTable, SemanticError> {
        analyze(&[unit("/src/main.qd", None, source)])
    }

    #[test]
    fn test_minimal_program() {
        let table = analyze_one("fn main() {\n\tpush 1 2\n\tadd\n\tprint\n}").unwrap();
        assert_eq!(table.functions().count(), 1);
    }

    #[test]
    fn test_missing_main() {
        let err = analyze_one("fn helper() {\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'main'");
        assert_eq!(err.line, 0);
    }

    #[test]
    fn test_adding_main_fixes_missing_main() {
        assert!(analyze_one("fn helper() {\n}").is_err());
        assert!(analyze_one("fn helper() {\n}\nfn main() {\n\thelper\n}").is_ok());
    }

    #[test]
    fn test_function_redefinition() {
        let err = analyze_one("fn foo() {\n}\nfn foo() {\n}\nfn main() {\n}").unwrap_err();
        assert_eq!(err.message, "redefinition of function 'foo'");
        assert_eq!((err.line, err.column), (3, 4));
        assert_eq!(err.filepath, "/src/main.qd");
    }

    #[test]
    fn test_label_redefinition_is_per_function() {
        assert!(analyze_one("fn a() {\nx:\n}\nfn main() {\nx:\n}").is_ok());
        let err = analyze_one("fn main() {\nx:\nx:\n}").unwrap_err();
        assert_eq!(err.message, "redefinition of label 'x'");
    }

    #[test]
    fn test_local_clashing_with_parameter() {
        let err = analyze_one("fn f(n) {\n\tlocal n\n}\nfn main() {\n}").unwrap_err();
        assert_eq!(err.message, "redefinition of local 'n'");
    }

    #[test]
    fn test_undefined_reference() {
        let err = analyze_one("fn main() {\n\tpush 1\n\tfrobnicate\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'frobnicate'");
        assert_eq!((err.line, err.column), (3, 2));
    }

    #[test]
    fn test_locals_params_labels_and_constants_resolve() {
        let source = "const LIMIT 10\nfn count(start) {\n\tpush start\n\tlocal n\n\tpush n LIMIT\nagain:\n\tjl again\n}\nfn main() {\n\tcount 1\n}";
        assert!(analyze_one(source).is_ok());
    }

    #[test]
    fn test_labels_do_not_leak_between_functions() {
        let err = analyze_one("fn a() {\nhere:\n}\nfn main() {\n\tjmp here\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'here'");
    }

    #[test]
    fn test_jump_target_must_be_a_label() {
        let err = analyze_one("fn main() {\n\tjmp add\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'add'");
        assert_eq!((err.line, err.column), (2, 6));

        let err = analyze_one("fn main() {\n\tpush 1\n\tlocal x\n\tjmp x\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'x'");
        assert_eq!((err.line, err.column), (4, 6));

        let err = analyze_one("fn f() {\n}\nfn main() {\n\tpush 0\n\tjz f\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'f'");
        assert_eq!((err.line, err.column), (5, 5));
    }

    #[test]
    fn test_qualified_reference_across_modules() {
        let units = [
            unit("/src/main.qd", None, "fn main() {\n\tmath::square 3\n\tpush math::TWO\n}"),
            unit(
                "/lib/math/module.qd",
                Some("math"),
                "const TWO 2\nfn square() {\n\tdup\n\tmul\n}\nfn cube() {\n\tdup\n\tsquare\n\tmul\n}",
            ),
        ];
        let table = analyze(&units).unwrap();

        let square = table.global("math::square").unwrap();
        assert_eq!(square.unit, "math");
        assert_eq!(square.base_name(), "square");
        assert!(table.is_module("math"));
    }

    #[test]
    fn test_unqualified_import_call_is_undefined() {
        let units = [
            unit("/src/main.qd", None, "fn main() {\n\tsquare\n}"),
            unit("/lib/math/module.qd", Some("math"), "fn square() {\n}"),
        ];
        let err = analyze(&units).unwrap_err();
        assert_eq!(err.message, "undefined reference to 'square'");
    }

    #[test]
    fn test_unknown_module_qualifier() {
        let err = analyze_one("fn main() {\n\tnope::thing\n}").unwrap_err();
        assert_eq!(err.message, "undefined reference to 'nope'");
    }

    #[test]
    fn test_missing_qualified_member() {
        let units = [
            unit("/src/main.qd", None, "fn main() {\n\tmath::nothing\n}"),
            unit("/lib/math/module.qd", Some("math"), "fn square() {\n}"),
        ];
        let err = analyze(&units).unwrap_err();
        assert_eq!(err.message, "undefined reference to 'math::nothing'");
    }

    #[test]
    fn test_main_inside_module_is_not_entry_point() {
        let units = [
            unit("/src/main.qd", None, "fn helper() {\n}"),
            unit("/lib/m/module.qd", Some("m"), "fn main() {\n}"),
        ];
        assert_eq!(
            analyze(&units).unwrap_err().message,
            "undefined reference to 'main'"
        );
    }

    #[test]
    fn test_inline_c_contents_are_not_checked() {
        assert!(analyze_one("fn main() {\n\t__c { undefined_c_function(); }\n}").is_ok());
    }

    #[test]
    fn test_reduce_operator_is_not_a_reference() {
        assert!(analyze_one("fn main() {\n\tmark\n\tpush 1 2 3\n\treduce add\n}").is_ok());
    }
}
