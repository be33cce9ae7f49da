//! Abstract Syntax Tree
//!
//! A module is a flat list of top-level statements. A function appears as a
//! `FunctionDeclaration` immediately followed by its `Body`.

use std::path::PathBuf;

use serde::Serialize;

use crate::frontend::lexer::JumpKind;
use crate::util::span::Span;

/// One parsed translation unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramModule {
    /// Module name derived from the file path
    pub name: String,
    pub filepath: PathBuf,
    pub statements: Vec<Stmt>,
    /// Imports in source order; drives module discovery
    pub imports: Vec<Import>,
}

impl ProgramModule {
    /// Functions declared in this module, paired with their bodies
    pub fn functions(&self) -> impl Iterator<Item = (&str, &[String], &[Stmt])> {
        self.statements.windows(2).filter_map(|pair| match (&pair[0].kind, &pair[1].kind) {
            (StmtKind::FunctionDeclaration { name, params }, StmtKind::Body { statements }) => {
                Some((name.as_str(), params.as_slice(), statements.as_slice()))
            }
            _ => None,
        })
    }
}

/// `use` target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Absolute path of the imported file
    pub path: PathBuf,
    /// Name the module is compiled under
    pub name: String,
}

/// Statement with its source span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(
        kind: StmtKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    ImportDirective(Import),
    FunctionDeclaration {
        name: String,
        params: Vec<String>,
    },
    /// Lowered instruction sequence of the preceding declaration
    Body {
        statements: Vec<Stmt>,
    },
    FunctionCall {
        name: String,
        module: Option<String>,
        args: Vec<Argument>,
    },
    InlineCCode {
        code: String,
    },
    ConstValue {
        name: String,
        literal: String,
    },
    /// Pop the top of the stack into a named local
    LocalValue {
        name: String,
    },
    Label {
        name: String,
    },
    Jump {
        kind: JumpKind,
        label: String,
    },
    ForLoop {
        start: Argument,
        step: Argument,
        end: Argument,
    },
    UnconditionalLoop,
    BreakStatement,
    ContinueStatement,
    /// `$` used as a statement: push the innermost iteration value
    IteratorReference,
    EndStatement,
    ReturnStatement,
    ReduceStatement {
        op: ReduceOp,
    },
}

/// Call argument, pushed before the call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Argument {
    /// Numeric literal, kept verbatim
    Number(String),
    /// String literal, pushed as counted character codes
    Str(String),
    /// Value of a local, parameter or constant
    Identifier {
        module: Option<String>,
        name: String,
    },
    /// Address of a local (`&name`)
    Pointer(String),
    /// Innermost loop iteration value (`$`)
    Iterator,
}

/// Fixed reduction operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReduceOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ReduceOp {
    pub fn from_name(name: &str) -> Option<ReduceOp> {
        match name {
            "add" => Some(ReduceOp::Add),
            "sub" => Some(ReduceOp::Sub),
            "mul" => Some(ReduceOp::Mul),
            "div" => Some(ReduceOp::Div),
            _ => None,
        }
    }

    /// Runtime selector passed to `__qd_reduce`
    pub fn c_constant(&self) -> &'static str {
        match self {
            ReduceOp::Add => "QD_REDUCE_ADD",
            ReduceOp::Sub => "QD_REDUCE_SUB",
            ReduceOp::Mul => "QD_REDUCE_MUL",
            ReduceOp::Div => "QD_REDUCE_DIV",
        }
    }
}
