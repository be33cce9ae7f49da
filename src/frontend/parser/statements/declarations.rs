//! Top-level declarations

use std::path::PathBuf;

use super::body::parse_body;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::TokenKind;
use crate::frontend::module::module_name_for;
use crate::frontend::parser::ast::{Import, Stmt, StmtKind};
use crate::frontend::parser::parser_state::{describe, ParserState};

/// `use <module>`; the lexer has already resolved the module path
pub fn parse_use(state: &mut ParserState<'_>) -> Result<Stmt, SyntaxError> {
    let start = state.bump().span;
    let module = state.expect(TokenKind::Module, "expected module after 'use'")?;

    let path = PathBuf::from(&module.literal);
    let name = module_name_for(&path);
    tracing::trace!("import '{}' from {}", name, path.display());

    Ok(Stmt::new(
        StmtKind::ImportDirective(Import { path, name }),
        state.span_from(start),
    ))
}

/// `fn <name>(<params>) { <body> }`, returned as declaration and body
pub fn parse_function(state: &mut ParserState<'_>) -> Result<(Stmt, Stmt), SyntaxError> {
    let start = state.bump().span;
    let name = state
        .expect(TokenKind::Identifier, "expected identifier after 'fn'")?
        .literal;

    state.expect(TokenKind::LParen, format!("expected '(' after '{}'", name))?;
    let params = parse_params(state)?;
    let declaration = Stmt::new(
        StmtKind::FunctionDeclaration {
            name: name.clone(),
            params,
        },
        state.span_from(start),
    );

    state.skip_newlines();
    if !state.at(TokenKind::LBrace) {
        return Err(state.error(format!(
            "expected '{{' before {}",
            describe(state.current())
        )));
    }
    let body_start = state.bump().span;
    let statements = parse_body(state, &name)?;
    let body = Stmt::new(StmtKind::Body { statements }, state.span_from(body_start));

    Ok((declaration, body))
}

/// Parameter names up to and including `)`; commas are optional
fn parse_params(state: &mut ParserState<'_>) -> Result<Vec<String>, SyntaxError> {
    let mut params = Vec::new();
    loop {
        state.skip_newlines();
        let token = state.current();
        match token.kind {
            TokenKind::RParen => {
                state.bump();
                return Ok(params);
            }
            TokenKind::Comma => {
                state.bump();
            }
            TokenKind::Identifier => {
                params.push(state.bump().literal);
            }
            _ => {
                return Err(state.error(format!(
                    "expected parameter name, found {}",
                    describe(token)
                )))
            }
        }
    }
}

/// `const <name> <numeric constant>`
pub fn parse_const(state: &mut ParserState<'_>) -> Result<Stmt, SyntaxError> {
    let start = state.bump().span;
    let name = state
        .expect(TokenKind::Identifier, "expected identifier after 'const'")?
        .literal;
    let literal = state
        .expect(
            TokenKind::NumericConstant,
            format!("expected numeric constant after '{}'", name),
        )?
        .literal;

    Ok(Stmt::new(
        StmtKind::ConstValue { name, literal },
        state.span_from(start),
    ))
}
