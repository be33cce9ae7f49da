//! Statement parsers
//!
//! - [`declarations`] - top-level `use`, `fn`, `const`
//! - [`body`] - function body scanner
//! - [`calls`] - function calls and their arguments
//! - [`control_flow`] - loops, jumps, `return`, `reduce`, `local`

pub mod body;
pub mod calls;
pub mod control_flow;
pub mod declarations;

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::TokenKind;
use crate::frontend::parser::ast::{Import, Stmt, StmtKind};
use crate::frontend::parser::parser_state::{describe, ParserState};

/// Parse every top-level statement up to `Eof`
pub fn parse_top_level(
    state: &mut ParserState<'_>,
) -> Result<(Vec<Stmt>, Vec<Import>), SyntaxError> {
    let mut statements = Vec::new();
    let mut imports = Vec::new();

    loop {
        let token = state.current();
        match token.kind {
            TokenKind::Eof => break,
            TokenKind::NewLine => {
                state.bump();
            }
            TokenKind::BeginScopeComment => skip_comment(state)?,
            TokenKind::Use => {
                let stmt = declarations::parse_use(state)?;
                if let StmtKind::ImportDirective(import) = &stmt.kind {
                    imports.push(import.clone());
                }
                statements.push(stmt);
            }
            TokenKind::FnSignature => {
                let (declaration, body) = declarations::parse_function(state)?;
                statements.push(declaration);
                statements.push(body);
            }
            TokenKind::Const => statements.push(declarations::parse_const(state)?),
            TokenKind::InlineC => {
                let token = state.bump();
                statements.push(Stmt::new(
                    StmtKind::InlineCCode {
                        code: token.literal,
                    },
                    token.span,
                ));
            }
            _ => {
                return Err(state.error(format!(
                    "expected declaration, found {}",
                    describe(token)
                )))
            }
        }
    }

    Ok((statements, imports))
}

/// Consume a `/* ... */` pair
pub fn skip_comment(state: &mut ParserState<'_>) -> Result<(), SyntaxError> {
    let begin = state.bump();
    if state.skip(TokenKind::EndScopeComment) {
        Ok(())
    } else {
        Err(state.error_at("unterminated comment", begin.span))
    }
}
