//! 代码生成器
//!
//! Lowers one parsed [`TranslationUnit`] to a C header/source pair.
//!
//! - every non-entry function becomes `void __qd_<unit>_<name>(int argc, ...)`
//!   which pushes its variadic arguments before running its body
//! - the entry point becomes the standard `int main(int argc, char** argv)`
//! - stack operations call the primitives of the embedded runtime pair
//!   ([`RUNTIME_HEADER`], [`RUNTIME_SOURCE`])

pub mod buffer;
pub mod control_flow;
pub mod naming;
pub mod stmt;

#[cfg(test)]
mod tests;

use indexmap::IndexSet;
use thiserror::Error;

use crate::frontend::parser::ast::{ProgramModule, Stmt, StmtKind};
use crate::frontend::semantic::{qualify, SymbolTable, ENTRY_POINT};
use crate::frontend::TranslationUnit;
use crate::util::config::{Config, RuntimeConfig};

use self::buffer::CBuffer;
use self::naming::REAL_T;

/// Runtime support header, copied next to the generated files
pub const RUNTIME_HEADER: &str = include_str!("data/qd_base.h");
/// Runtime support source, copied next to the generated files
pub const RUNTIME_SOURCE: &str = include_str!("data/qd_base.c");

pub const RUNTIME_HEADER_NAME: &str = "qd_base.h";
pub const RUNTIME_SOURCE_NAME: &str = "qd_base.c";

/// 代码生成错误
///
/// Analysis rejects every program that would hit one of these; they guard
/// generators driven without a prior `analyze`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("translation unit '{0}' has not been parsed")]
    NotParsed(String),

    #[error("function body without a declaration")]
    OrphanBody,

    #[error("function '{0}' has no body")]
    MissingBody(String),

    #[error("entry point '{0}' cannot take parameters")]
    EntryPointParameters(String),

    #[error("unbalanced 'end' in function '{0}'")]
    UnbalancedEnd(String),

    #[error("'$' used outside of a loop")]
    IteratorOutsideLoop,

    #[error("'{0}' is not a value")]
    NotAValue(String),

    #[error("'{0}' cannot be called")]
    NotCallable(String),

    #[error("unresolved reference to '{0}'")]
    Unresolved(String),

    #[error("{0} is only allowed at top level")]
    Misplaced(&'static str),
}

/// Generated files of one translation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub header_name: String,
    pub header: String,
    pub source_name: String,
    pub source: String,
}

/// C 代码生成器
#[derive(Debug, Clone)]
pub struct CGenerator {
    runtime: RuntimeConfig,
}

impl CGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            runtime: config.runtime.clone(),
        }
    }

    /// Lower `unit`; `symbols` must come from analyzing the whole program
    pub fn generate(
        &self,
        unit: &TranslationUnit,
        symbols: &SymbolTable,
    ) -> Result<GeneratedUnit, CodegenError> {
        let module = unit
            .module
            .as_ref()
            .ok_or_else(|| CodegenError::NotParsed(unit.filepath.display().to_string()))?;

        let unit_name = unit.unit_name();
        let mut emitter = UnitEmitter::new(&unit_name, unit.module_name.as_deref(), symbols);
        emitter.emit_module(module)?;

        let header_name = naming::header_file(&unit_name, &unit.filepath);
        let source_name = naming::source_file(&unit_name, &unit.filepath);
        let header = self.render_header(unit, &emitter);
        let source = emitter.render_source(&header_name);

        tracing::debug!(
            "generated {} ({} bytes) and {} ({} bytes)",
            header_name,
            header.len(),
            source_name,
            source.len()
        );

        Ok(GeneratedUnit {
            header_name,
            header,
            source_name,
            source,
        })
    }

    /// Runtime macros, overridable by the toolchain's `-D` flags
    fn config_macros(&self) -> Vec<(&'static str, String)> {
        vec![
            ("QD_STACK_DEPTH", self.runtime.stack_depth.to_string()),
            ("QD_MARK_STACK_DEPTH", self.runtime.mark_stack_depth.to_string()),
            (REAL_T, self.runtime.real_type.clone()),
            ("QD_STRING_LENGTH", self.runtime.string_length.to_string()),
        ]
    }

    fn render_header(
        &self,
        unit: &TranslationUnit,
        emitter: &UnitEmitter<'_>,
    ) -> String {
        let guard = naming::include_guard(&unit.filepath);
        let mut out = CBuffer::new();

        out.line(&format!("#ifndef {}", guard));
        out.line(&format!("#define {}", guard));
        out.blank();

        for (name, value) in self.config_macros() {
            out.line(&format!("#ifndef {}", name));
            out.line(&format!("#define {} {}", name, value));
            out.line("#endif");
        }
        out.blank();

        out.line(&format!("#include \"{}\"", RUNTIME_HEADER_NAME));
        for include in &emitter.includes {
            out.line(&format!("#include \"{}\"", include));
        }
        out.blank();

        for declaration in &emitter.declarations {
            out.line(declaration);
        }
        if !emitter.declarations.is_empty() {
            out.blank();
        }

        out.line(&format!("#endif /* {} */", guard));
        out.finish()
    }
}

/// Function being lowered
#[derive(Debug)]
pub(crate) struct FunctionFrame {
    /// Scope key of the function's symbols
    pub qualified: String,
    pub is_entry: bool,
    /// Open `for`/`loop` blocks
    pub loop_depth: usize,
}

/// Per-unit lowering state
pub(crate) struct UnitEmitter<'a> {
    pub unit_name: &'a str,
    pub module_name: Option<&'a str>,
    pub symbols: &'a SymbolTable,
    /// Headers of imported modules
    pub includes: Vec<String>,
    /// Declarations exported through the header
    pub declarations: Vec<String>,
    /// Declarations of other units' symbols used by this one
    pub foreign: IndexSet<String>,
    pub body: CBuffer,
    pub frame: Option<FunctionFrame>,
}

impl<'a> UnitEmitter<'a> {
    pub fn new(
        unit_name: &'a str,
        module_name: Option<&'a str>,
        symbols: &'a SymbolTable,
    ) -> Self {
        Self {
            unit_name,
            module_name,
            symbols,
            includes: Vec::new(),
            declarations: Vec::new(),
            foreign: IndexSet::new(),
            body: CBuffer::new(),
            frame: None,
        }
    }

    /// Lower the top-level statement list
    pub fn emit_module(
        &mut self,
        module: &ProgramModule,
    ) -> Result<(), CodegenError> {
        let mut pending: Option<(&str, &[String])> = None;

        for stmt in &module.statements {
            match &stmt.kind {
                StmtKind::FunctionDeclaration { name, params } => {
                    if let Some((previous, _)) = pending {
                        return Err(CodegenError::MissingBody(previous.to_string()));
                    }
                    pending = Some((name.as_str(), params.as_slice()));
                }
                StmtKind::Body { statements } => {
                    let (name, params) = pending.take().ok_or(CodegenError::OrphanBody)?;
                    self.emit_function(name, params, statements)?;
                }
                StmtKind::ImportDirective(import) => {
                    self.includes
                        .push(naming::header_file(&import.name, &import.path));
                }
                StmtKind::ConstValue { name, literal } => {
                    let symbol = naming::user_symbol(self.unit_name, name);
                    self.declarations
                        .push(format!("extern const {} {};", REAL_T, symbol));
                    self.body
                        .line(&format!("const {} {} = {};", REAL_T, symbol, literal));
                    self.body.blank();
                }
                StmtKind::InlineCCode { code } => {
                    self.body.raw(code);
                    self.body.blank();
                }
                other => return Err(CodegenError::Misplaced(stmt::describe(other))),
            }
        }

        match pending {
            Some((name, _)) => Err(CodegenError::MissingBody(name.to_string())),
            None => Ok(()),
        }
    }

    fn emit_function(
        &mut self,
        name: &str,
        params: &[String],
        statements: &[Stmt],
    ) -> Result<(), CodegenError> {
        let qualified = qualify(self.module_name, name);
        let is_entry = self.module_name.is_none() && name == ENTRY_POINT;
        tracing::trace!("lowering function '{}'", qualified);

        if is_entry {
            if !params.is_empty() {
                return Err(CodegenError::EntryPointParameters(qualified));
            }
            self.body.open("int main(int argc, char** argv) {");
            self.body.line("(void)argc;");
            self.body.line("(void)argv;");
        } else {
            let symbol = naming::user_symbol(self.unit_name, name);
            self.declarations
                .push(format!("void {}(int argc, ...);", symbol));
            self.body
                .open(&format!("void {}(int argc, ...) {{", symbol));
            self.body.line("va_list args;");
            self.body.line("va_start(args, argc);");
            self.body.line("__qd_push_va(argc, args);");
            self.body.line("va_end(args);");
        }

        let mut variables: IndexSet<&str> = params.iter().map(String::as_str).collect();
        collect_locals(statements, &mut variables);
        for variable in &variables {
            self.body
                .line(&format!("{} {} = 0;", REAL_T, naming::local(variable)));
        }

        if !params.is_empty() {
            self.underflow_guard(params.len());
            for param in params.iter().rev() {
                self.pop_into(&naming::local(param));
            }
        }

        self.frame = Some(FunctionFrame {
            qualified,
            is_entry,
            loop_depth: 0,
        });
        for stmt in statements {
            self.emit_stmt(stmt)?;
        }

        if let Some(frame) = self.frame.take() {
            if frame.loop_depth != 0 {
                return Err(CodegenError::UnbalancedEnd(frame.qualified));
            }
        }
        if is_entry {
            self.body.line("return 0;");
        }
        self.body.close("}");
        self.body.blank();
        Ok(())
    }

    /// `if (__qd_stack_ptr < n)` panic
    pub fn underflow_guard(
        &mut self,
        count: usize,
    ) {
        self.body
            .open(&format!("if (__qd_stack_ptr < {}) {{", count));
        self.body.line("__qd_panic_stack_underflow();");
        self.body.close("}");
    }

    /// Pop the top cell into `target`; the caller guards for underflow
    pub fn pop_into(
        &mut self,
        target: &str,
    ) {
        self.body
            .line(&format!("{} = __qd_stack[--__qd_stack_ptr];", target));
    }

    fn render_source(
        self,
        header_name: &str,
    ) -> String {
        let mut out = CBuffer::new();
        out.line(&format!("#include \"{}\"", header_name));
        out.blank();
        for declaration in &self.foreign {
            out.line(declaration);
        }
        if !self.foreign.is_empty() {
            out.blank();
        }

        let mut source = out.finish();
        source.push_str(&self.body.finish());
        source
    }
}

/// Names declared by `local`, in order of first appearance
fn collect_locals<'s>(
    statements: &'s [Stmt],
    into: &mut IndexSet<&'s str>,
) {
    for stmt in statements {
        if let StmtKind::LocalValue { name } = &stmt.kind {
            into.insert(name.as_str());
        }
    }
}
