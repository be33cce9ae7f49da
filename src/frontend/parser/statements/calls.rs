//! Function calls and argument lists

use super::body::BodyContext;
use super::skip_comment;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::TokenKind;
use crate::frontend::parser::ast::{Argument, Stmt, StmtKind};
use crate::frontend::parser::parser_state::{describe, ParserState};

/// `name [args...]` or `module::name [args...]` up to the end of the line
pub fn parse_call(
    state: &mut ParserState<'_>,
    ctx: &BodyContext,
) -> Result<Stmt, SyntaxError> {
    let first = state.bump();
    let start = first.span;

    let (module, name) = if state.skip(TokenKind::DoubleColon) {
        let name = state.expect(TokenKind::Identifier, "expected identifier after '::'")?;
        (Some(first.literal), name.literal)
    } else {
        (None, first.literal)
    };

    let mut args = Vec::new();
    while !state.at_terminator() {
        match state.current().kind {
            TokenKind::Comma => {
                state.bump();
            }
            TokenKind::BeginScopeComment => skip_comment(state)?,
            _ => args.push(parse_argument(state, ctx)?),
        }
    }
    let span = state.span_from(start);
    state.skip(TokenKind::NewLine);

    Ok(Stmt::new(StmtKind::FunctionCall { name, module, args }, span))
}

/// One value-producing operand
pub fn parse_argument(
    state: &mut ParserState<'_>,
    ctx: &BodyContext,
) -> Result<Argument, SyntaxError> {
    let token = state.current();
    match token.kind {
        TokenKind::NumericConstant => Ok(Argument::Number(state.bump().literal)),
        TokenKind::StringLiteral => Ok(Argument::Str(state.bump().literal)),
        TokenKind::Identifier => {
            let first = state.bump().literal;
            if state.skip(TokenKind::DoubleColon) {
                let name = state.expect(TokenKind::Identifier, "expected identifier after '::'")?;
                Ok(Argument::Identifier {
                    module: Some(first),
                    name: name.literal,
                })
            } else {
                Ok(Argument::Identifier {
                    module: None,
                    name: first,
                })
            }
        }
        TokenKind::Ampersand => {
            state.bump();
            let name = state.expect(TokenKind::Identifier, "expected identifier after '&'")?;
            Ok(Argument::Pointer(name.literal))
        }
        TokenKind::Dollar => {
            if !ctx.in_loop() {
                return Err(state.error("unexpected '$'"));
            }
            state.bump();
            Ok(Argument::Iterator)
        }
        _ => Err(state.error(format!("unexpected argument {}", describe(token)))),
    }
}
