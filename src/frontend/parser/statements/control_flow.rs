//! Loops, jumps and other keyword statements

use super::body::BodyContext;
use super::calls::parse_argument;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::TokenKind;
use crate::frontend::parser::ast::{Argument, ReduceOp, Stmt, StmtKind};
use crate::frontend::parser::parser_state::ParserState;

/// `for <start> <step> <end>`
pub fn parse_for(
    state: &mut ParserState<'_>,
    ctx: &mut BodyContext,
) -> Result<Stmt, SyntaxError> {
    let start_span = state.bump().span;

    let start = parse_bound(state, ctx)?;
    let step = parse_bound(state, ctx)?;
    let end = parse_bound(state, ctx)?;
    let span = state.span_from(start_span);
    state.expect_terminator("for")?;

    ctx.loop_depth += 1;
    Ok(Stmt::new(StmtKind::ForLoop { start, step, end }, span))
}

/// Loop bounds are numbers, named values or an enclosing `$`
fn parse_bound(
    state: &mut ParserState<'_>,
    ctx: &BodyContext,
) -> Result<Argument, SyntaxError> {
    if state.at_terminator() {
        return Err(state.error("expected start, step and end after 'for'"));
    }
    let span = state.span();
    match parse_argument(state, ctx)? {
        Argument::Str(_) | Argument::Pointer(_) => {
            Err(state.error_at("loop bounds must be numeric", span))
        }
        bound => Ok(bound),
    }
}

/// `loop`
pub fn parse_loop(
    state: &mut ParserState<'_>,
    ctx: &mut BodyContext,
) -> Result<Stmt, SyntaxError> {
    let span = state.bump().span;
    state.expect_terminator("loop")?;
    ctx.loop_depth += 1;
    Ok(Stmt::new(StmtKind::UnconditionalLoop, span))
}

/// `end` closes the innermost loop
pub fn parse_end(
    state: &mut ParserState<'_>,
    ctx: &mut BodyContext,
) -> Result<Stmt, SyntaxError> {
    if !ctx.in_loop() {
        return Err(state.error("unexpected 'end'"));
    }
    let span = state.bump().span;
    state.expect_terminator("end")?;
    ctx.loop_depth -= 1;
    Ok(Stmt::new(StmtKind::EndStatement, span))
}

/// `break` or `continue`
pub fn parse_loop_exit(
    state: &mut ParserState<'_>,
    ctx: &BodyContext,
) -> Result<Stmt, SyntaxError> {
    let token = state.current();
    if !ctx.in_loop() {
        return Err(state.error(format!("unexpected '{}'", token.literal)));
    }
    let kind = if token.is(TokenKind::Break) {
        StmtKind::BreakStatement
    } else {
        StmtKind::ContinueStatement
    };
    let token = state.bump();
    state.expect_terminator(&token.literal)?;
    Ok(Stmt::new(kind, token.span))
}

/// `<jump mnemonic> <label>`
pub fn parse_jump(state: &mut ParserState<'_>) -> Result<Stmt, SyntaxError> {
    let token = state.bump();
    let kind = match token.kind {
        TokenKind::Jump(kind) => kind,
        _ => return Err(state.error_at("expected jump", token.span)),
    };

    let label = state.expect(
        TokenKind::Identifier,
        format!("expected 'label' after '{}'", kind.mnemonic()),
    )?;
    let span = token.span.to(label.span);
    state.expect_terminator(kind.mnemonic())?;

    Ok(Stmt::new(
        StmtKind::Jump {
            kind,
            label: label.literal,
        },
        span,
    ))
}

/// `local <name>`
pub fn parse_local(state: &mut ParserState<'_>) -> Result<Stmt, SyntaxError> {
    let start = state.bump().span;
    let name = state.expect(TokenKind::Identifier, "expected identifier after 'local'")?;
    let span = start.to(name.span);
    state.expect_terminator(&name.literal)?;
    Ok(Stmt::new(StmtKind::LocalValue { name: name.literal }, span))
}

/// `reduce <add|sub|mul|div>`
pub fn parse_reduce(state: &mut ParserState<'_>) -> Result<Stmt, SyntaxError> {
    let start = state.bump().span;
    let name = state.expect(TokenKind::Identifier, "expected reduction after 'reduce'")?;
    let op = ReduceOp::from_name(&name.literal).ok_or_else(|| {
        state.error_at(format!("unknown reduction '{}'", name.literal), name.span)
    })?;
    let span = start.to(name.span);
    state.expect_terminator(&name.literal)?;
    Ok(Stmt::new(StmtKind::ReduceStatement { op }, span))
}
