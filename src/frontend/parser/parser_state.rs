//! Parser state and error handling

use std::path::Path;

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::tokens::*;
use crate::util::span::Span;

/// Cursor over one file's token slice
///
/// Reading past the end yields the trailing `Eof` token.
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    filepath: &'a Path,
    eof: Token,
}

impl<'a> ParserState<'a> {
    pub fn new(
        filepath: &'a Path,
        tokens: &'a [Token],
    ) -> Self {
        let end = tokens.last().map(|t| t.span).unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            filepath,
            eof: Token::new(TokenKind::Eof, "", Span::new(end.end, end.end)),
        }
    }

    pub fn filepath(&self) -> &'a Path {
        self.filepath
    }

    pub fn at_end(&self) -> bool {
        self.current().is(TokenKind::Eof)
    }

    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub fn peek(&self) -> &Token {
        self.peek_nth(1)
    }

    pub fn peek_nth(
        &self,
        n: usize,
    ) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token
    pub fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_else(|| self.span())
    }

    /// Span from `start` to the end of the last consumed token
    pub fn span_from(
        &self,
        start: Span,
    ) -> Span {
        start.to(self.prev_span())
    }

    pub fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn at(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current().is(kind)
    }

    pub fn skip(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.skip(TokenKind::NewLine) {}
    }

    /// Consume a token of `kind` or fail with `message` at the current token
    pub fn expect(
        &mut self,
        kind: TokenKind,
        message: impl Into<String>,
    ) -> Result<Token, SyntaxError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(message))
        }
    }

    /// True at a statement boundary: new line, `}` or end of input
    pub fn at_terminator(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::NewLine | TokenKind::RBrace | TokenKind::Eof
        )
    }

    /// Require a statement boundary after `what`; a new line is consumed
    pub fn expect_terminator(
        &mut self,
        what: &str,
    ) -> Result<(), SyntaxError> {
        if !self.at_terminator() {
            return Err(self.error(format!(
                "expected new line after '{}', found {}",
                what,
                describe(self.current())
            )));
        }
        self.skip(TokenKind::NewLine);
        Ok(())
    }

    /// Error anchored at the current token
    pub fn error(
        &self,
        message: impl Into<String>,
    ) -> SyntaxError {
        self.error_at(message, self.span())
    }

    pub fn error_at(
        &self,
        message: impl Into<String>,
        span: Span,
    ) -> SyntaxError {
        SyntaxError::at(message, self.filepath, span)
    }
}

/// Token as shown in "found ..." messages
pub fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::NewLine
        | TokenKind::Eof
        | TokenKind::InlineC
        | TokenKind::Module
        | TokenKind::StringLiteral
        | TokenKind::BeginScopeComment
        | TokenKind::EndScopeComment => token.kind.describe().to_string(),
        _ => format!("'{}'", token.literal),
    }
}
