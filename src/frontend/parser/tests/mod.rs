//! Parser tests
//!
//! - declarations: `fn`, `const`, `use`, top-level rules
//! - body: calls, arguments, labels, jumps, locals
//! - loops: `for`/`loop`/`end` depth tracking
//! - defers: `defer` replay at `return` and body end
//! - errors: syntax error messages


use std::path::Path;

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::lex;
use crate::frontend::module::Resolver;
use crate::frontend::parser::{parse, ProgramModule, Stmt, StmtKind};

pub(crate) fn parse_str(source: &str) -> Result<ProgramModule, SyntaxError> {
    let path = Path::new("test.qd");
    let mut resolver = Resolver::new(vec![]);
    let out = lex(path, source.as_bytes(), &mut resolver)?;
    parse(path, &out.tokens)
}

/// Body statements of the first function
pub(crate) fn body_of(source: &str) -> Vec<Stmt> {
    let module = parse_str(source).unwrap();
    module
        .statements
        .into_iter()
        .find_map(|stmt| match stmt.kind {
            StmtKind::Body { statements } => Some(statements),
            _ => None,
        })
        .expect("no function body")
}

/// Parse error message
pub(crate) fn error_of(source: &str) -> String {
    parse_str(source).unwrap_err().message
}
