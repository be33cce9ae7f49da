//! Lexer tests module
//!
//! - basic: 标识符、关键字、标点、换行与位置
//! - literals: 数字、字符串、内联 C
//! - comments: 行注释与块注释
//! - imports: `use` 解析
//! - errors: 错误处理
//! - properties: span 重新词法分析性质

mod errors;
mod properties;

use std::path::Path;

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::{lex, Token, TokenKind};
use crate::frontend::module::Resolver;

/// Lex `source` as `test.qd` with no search roots
pub(crate) fn lex_str(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut resolver = Resolver::new(vec![]);
    lex(Path::new("test.qd"), source.as_bytes(), &mut resolver).map(|out| out.tokens)
}

/// Token kinds without the trailing EOF
pub(crate) fn kinds(source: &str) -> Vec<TokenKind> {
    let tokens = lex_str(source).unwrap();
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    tokens[..tokens.len() - 1].iter().map(|t| t.kind).collect()
}
