//! Function body scanner
//!
//! Bodies are parsed one logical line at a time. Only `for`/`loop` ... `end`
//! nest; braces never do.

use super::calls::parse_call;
use super::control_flow;
use super::skip_comment;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::TokenKind;
use crate::frontend::parser::ast::{Stmt, StmtKind};
use crate::frontend::parser::parser_state::{describe, ParserState};

/// Words a C label cannot be named, including the `<stdbool.h>` macros
const C_KEYWORDS: &[&str] = &[
    "auto", "bool", "case", "char", "const", "constexpr", "default", "do", "double", "else",
    "enum", "extern", "false", "float", "goto", "if", "inline", "int", "long", "nullptr",
    "register", "restrict", "short", "signed", "sizeof", "static", "struct", "switch", "true",
    "typedef", "typeof", "union", "unsigned", "void", "volatile", "while", "_Alignas",
    "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary", "_Noreturn",
    "_Static_assert", "_Thread_local",
];

/// Per-body parsing state
#[derive(Debug, Default)]
pub struct BodyContext {
    /// Open `for`/`loop` blocks
    pub loop_depth: usize,
    /// Deferred calls in registration order
    pub defers: Vec<Stmt>,
}

impl BodyContext {
    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }
}

/// Parse statements after `{` up to and including the closing `}`
pub fn parse_body(
    state: &mut ParserState<'_>,
    function: &str,
) -> Result<Vec<Stmt>, SyntaxError> {
    let mut ctx = BodyContext::default();
    let mut statements = Vec::new();

    loop {
        let token = state.current();
        match token.kind {
            TokenKind::NewLine => {
                state.bump();
            }
            TokenKind::BeginScopeComment => skip_comment(state)?,
            TokenKind::RBrace => {
                if ctx.in_loop() {
                    return Err(state.error("missing 'end'"));
                }
                state.bump();
                statements.extend(ctx.defers.iter().cloned());
                break;
            }
            TokenKind::Eof => return Err(state.error("expected '}' at end of input")),
            TokenKind::LBrace => return Err(state.error("unexpected '{' in function body")),
            TokenKind::FnSignature | TokenKind::Use | TokenKind::Const => {
                return Err(state.error(format!(
                    "'{}' is not allowed inside a function body",
                    token.literal
                )))
            }
            TokenKind::InlineC => {
                let token = state.bump();
                statements.push(Stmt::new(
                    StmtKind::InlineCCode {
                        code: token.literal,
                    },
                    token.span,
                ));
            }
            TokenKind::Identifier if state.peek().is(TokenKind::Colon) => {
                if C_KEYWORDS.contains(&token.literal.as_str()) {
                    return Err(state.error(format!(
                        "label '{}' is a reserved C keyword",
                        token.literal
                    )));
                }
                let name = state.bump();
                state.bump();
                statements.push(Stmt::new(
                    StmtKind::Label {
                        name: name.literal.clone(),
                    },
                    state.span_from(name.span),
                ));
                state.expect_terminator(&format!("{}:", name.literal))?;
            }
            TokenKind::Identifier => statements.push(parse_call(state, &ctx)?),
            TokenKind::Defer => {
                let start = state.bump().span;
                if !state.at(TokenKind::Identifier) {
                    return Err(state.error("expected function call after 'defer'"));
                }
                // replayed outside any loop, so `$` is rejected
                let mut call = parse_call(state, &BodyContext::default())?;
                call.span = start.to(call.span);
                ctx.defers.push(call);
            }
            TokenKind::Return => {
                let start = state.bump().span;
                statements.extend(ctx.defers.iter().cloned());
                statements.push(Stmt::new(StmtKind::ReturnStatement, start));
                state.expect_terminator("return")?;
            }
            TokenKind::Dollar => {
                if !ctx.in_loop() {
                    return Err(state.error("unexpected '$'"));
                }
                let start = state.bump().span;
                statements.push(Stmt::new(StmtKind::IteratorReference, start));
                state.expect_terminator("$")?;
            }
            TokenKind::For => statements.push(control_flow::parse_for(state, &mut ctx)?),
            TokenKind::Loop => statements.push(control_flow::parse_loop(state, &mut ctx)?),
            TokenKind::End => statements.push(control_flow::parse_end(state, &mut ctx)?),
            TokenKind::Break | TokenKind::Continue => {
                statements.push(control_flow::parse_loop_exit(state, &ctx)?)
            }
            TokenKind::Jump(_) => statements.push(control_flow::parse_jump(state)?),
            TokenKind::Local => statements.push(control_flow::parse_local(state)?),
            TokenKind::Reduce => statements.push(control_flow::parse_reduce(state)?),
            _ => {
                return Err(state.error(format!(
                    "expected statement, found {}",
                    describe(token)
                )))
            }
        }
    }

    tracing::trace!("parsed body of '{}': {} statements", function, statements.len());
    Ok(statements)
}
