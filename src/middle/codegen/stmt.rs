//! 语句代码生成
//!
//! Calls, argument coercion and the non-branching statements.

use super::naming::{self, REAL_T};
use super::{CodegenError, UnitEmitter};
use crate::frontend::parser::ast::{Argument, Stmt, StmtKind};
use crate::frontend::semantic::{is_builtin, qualify, Symbol, SymbolKind, ENTRY_POINT};

/// What a call statement names
enum CallTarget {
    /// C function to call with the arguments
    Function(String),
    /// Value pushed ahead of the arguments
    Value(String),
}

/// Statement kind as named in errors
pub fn describe(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::ImportDirective(_) => "'use'",
        StmtKind::FunctionDeclaration { .. } => "'fn'",
        StmtKind::Body { .. } => "a function body",
        StmtKind::FunctionCall { .. } => "a call",
        StmtKind::InlineCCode { .. } => "inline C",
        StmtKind::ConstValue { .. } => "'const'",
        StmtKind::LocalValue { .. } => "'local'",
        StmtKind::Label { .. } => "a label",
        StmtKind::Jump { .. } => "a jump",
        StmtKind::ForLoop { .. } => "'for'",
        StmtKind::UnconditionalLoop => "'loop'",
        StmtKind::BreakStatement => "'break'",
        StmtKind::ContinueStatement => "'continue'",
        StmtKind::IteratorReference => "'$'",
        StmtKind::EndStatement => "'end'",
        StmtKind::ReturnStatement => "'return'",
        StmtKind::ReduceStatement { .. } => "'reduce'",
    }
}

impl<'a> UnitEmitter<'a> {
    /// 生成语句
    pub fn emit_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::FunctionCall { name, module, args } => {
                self.emit_call(name, module.as_deref(), args)
            }
            StmtKind::InlineCCode { code } => {
                self.body.raw(code);
                Ok(())
            }
            StmtKind::LocalValue { name } => {
                self.underflow_guard(1);
                self.pop_into(&naming::local(name));
                Ok(())
            }
            StmtKind::Label { name } => {
                self.emit_label(name);
                Ok(())
            }
            StmtKind::Jump { kind, label } => {
                self.emit_jump(*kind, label);
                Ok(())
            }
            StmtKind::ForLoop { start, step, end } => self.emit_for(start, step, end),
            StmtKind::UnconditionalLoop => self.emit_loop(),
            StmtKind::EndStatement => self.emit_end(),
            StmtKind::BreakStatement => {
                self.body.line("break;");
                Ok(())
            }
            StmtKind::ContinueStatement => {
                self.body.line("continue;");
                Ok(())
            }
            StmtKind::IteratorReference => {
                let iterator = self.current_iterator()?;
                self.body
                    .line(&format!("__qd_arg_push({});", iterator));
                Ok(())
            }
            StmtKind::ReturnStatement => {
                let is_entry = self.frame.as_ref().map(|f| f.is_entry).unwrap_or(false);
                self.body
                    .line(if is_entry { "return 0;" } else { "return;" });
                Ok(())
            }
            StmtKind::ReduceStatement { op } => {
                self.body
                    .line(&format!("__qd_reduce({});", op.c_constant()));
                Ok(())
            }
            other @ (StmtKind::ImportDirective(_)
            | StmtKind::FunctionDeclaration { .. }
            | StmtKind::Body { .. }
            | StmtKind::ConstValue { .. }) => Err(CodegenError::Misplaced(describe(other))),
        }
    }

    /// `name args...` becomes `<c name>(argc, args...)`
    fn emit_call(
        &mut self,
        name: &str,
        module: Option<&str>,
        args: &[Argument],
    ) -> Result<(), CodegenError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            self.lower_argument(arg, &mut values)?;
        }

        let function = match self.call_target(name, module)? {
            CallTarget::Function(function) => function,
            CallTarget::Value(value) => {
                values.insert(0, value);
                naming::primitive("push")
            }
        };

        let mut call_args = Vec::with_capacity(values.len() + 1);
        call_args.push(values.len().to_string());
        call_args.extend(values);
        self.body
            .line(&format!("{}({});", function, call_args.join(", ")));
        Ok(())
    }

    /// User functions shadow primitives; a bare value name pushes the value
    fn call_target(
        &mut self,
        name: &str,
        module: Option<&str>,
    ) -> Result<CallTarget, CodegenError> {
        let display = qualify(module, name);
        let symbol = self.lookup(module, name).cloned();

        match symbol {
            Some(symbol) if symbol.kind == SymbolKind::Function => {
                if symbol.name == ENTRY_POINT {
                    return Err(CodegenError::NotCallable(display));
                }
                Ok(CallTarget::Function(self.function_symbol(&symbol)))
            }
            _ if module.is_none() && is_builtin(name) => {
                Ok(CallTarget::Function(naming::primitive(name)))
            }
            Some(symbol) if symbol.kind.is_value() => {
                Ok(CallTarget::Value(self.value_of(&symbol)))
            }
            Some(_) => Err(CodegenError::NotCallable(display)),
            None => Err(CodegenError::Unresolved(display)),
        }
    }

    /// Append the C expressions `arg` pushes
    ///
    /// A string becomes its length, one character code per character and a
    /// zero sentinel.
    fn lower_argument(
        &mut self,
        arg: &Argument,
        out: &mut Vec<String>,
    ) -> Result<(), CodegenError> {
        match arg {
            Argument::Str(text) => {
                out.push(format!("({}){}", REAL_T, text.chars().count()));
                out.extend(text.chars().map(|c| format!("({}){}", REAL_T, c as u32)));
                out.push(format!("({})0", REAL_T));
            }
            other => out.push(self.scalar(other)?),
        }
        Ok(())
    }

    /// Single-cell C expression for `arg`
    pub fn scalar(
        &mut self,
        arg: &Argument,
    ) -> Result<String, CodegenError> {
        match arg {
            Argument::Number(literal) => Ok(format!("({}){}", REAL_T, literal)),
            Argument::Str(text) => Err(CodegenError::NotAValue(format!("\"{}\"", text))),
            Argument::Identifier { module, name } => {
                let display = qualify(module.as_deref(), name);
                match self.lookup(module.as_deref(), name).cloned() {
                    Some(symbol) if symbol.kind.is_value() => Ok(self.value_of(&symbol)),
                    Some(_) => Err(CodegenError::NotAValue(display)),
                    None => Err(CodegenError::Unresolved(display)),
                }
            }
            Argument::Pointer(name) => match self.lookup(None, name).map(|s| s.kind) {
                Some(SymbolKind::Local) | Some(SymbolKind::Parameter) => Ok(format!(
                    "({})(uintptr_t)&{}",
                    REAL_T,
                    naming::local(name)
                )),
                Some(_) => Err(CodegenError::NotAValue(format!("&{}", name))),
                None => Err(CodegenError::Unresolved(name.clone())),
            },
            Argument::Iterator => self.current_iterator(),
        }
    }

    fn lookup(
        &self,
        module: Option<&str>,
        name: &str,
    ) -> Option<&Symbol> {
        let function = self.frame.as_ref().map(|f| f.qualified.as_str());
        self.symbols
            .resolve(self.module_name, function, module, name)
    }

    /// C name of a user function, declared locally when foreign
    fn function_symbol(
        &mut self,
        symbol: &Symbol,
    ) -> String {
        let c_name = naming::user_symbol(&symbol.unit, symbol.base_name());
        if symbol.unit != self.unit_name {
            self.foreign
                .insert(format!("void {}(int argc, ...);", c_name));
        }
        c_name
    }

    /// C expression reading a local, parameter or constant
    fn value_of(
        &mut self,
        symbol: &Symbol,
    ) -> String {
        match symbol.kind {
            SymbolKind::Constant => {
                let c_name = naming::user_symbol(&symbol.unit, symbol.base_name());
                if symbol.unit != self.unit_name {
                    self.foreign
                        .insert(format!("extern const {} {};", REAL_T, c_name));
                }
                c_name
            }
            _ => naming::local(symbol.base_name()),
        }
    }
}
