//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{
    is_digit, is_identifier_char, is_identifier_start, scan_inline_c, scan_number, scan_string,
};
use super::state::LexerState;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::tokens::*;
use crate::frontend::module::Resolver;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

/// Main lexer structure
///
/// One lexer owns exactly one file's character buffer. Imports are resolved
/// through the borrowed [`Resolver`] as soon as their literal is scanned.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    filepath: &'a Path,
    resolver: &'a mut Resolver,
    state: LexerState,
    in_comment: bool,
    submodules: Vec<PathBuf>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(
        filepath: &'a Path,
        source: &'a str,
        resolver: &'a mut Resolver,
    ) -> Self {
        Self {
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            filepath,
            resolver,
            state: LexerState::new(),
            in_comment: false,
            submodules: Vec::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// File being lexed
    pub fn filepath(&self) -> &Path {
        self.filepath
    }

    /// Absolute paths of every module imported so far
    pub fn into_submodules(self) -> Vec<PathBuf> {
        self.submodules
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Peek `n` characters ahead (0 is the next character)
    pub fn peek_nth(
        &self,
        n: usize,
    ) -> Option<char> {
        self.chars.clone().nth(n)
    }

    /// Error anchored at the start of the current token
    pub fn error(
        &self,
        message: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError::at(message, self.filepath, Span::point(self.start_position()))
    }

    /// Skip blanks and `//` comments; newlines are tokens and stop the skip
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn begin_token(&mut self) {
        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Consume block comment content up to and including `*/`
    ///
    /// Returns `None` when EOF is reached first; the missing end marker is
    /// reported by the parser.
    fn scan_comment_end(&mut self) -> Option<Token> {
        self.in_comment = false;
        loop {
            match self.peek().copied() {
                None => return None,
                Some('*') if self.peek_next() == Some('/') => {
                    self.begin_token();
                    self.advance();
                    self.advance();
                    return Some(self.make_token(TokenKind::EndScopeComment, "*/"));
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Generate next token, `Ok(None)` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        if self.in_comment {
            return Ok(self.scan_comment_end());
        }

        self.skip_whitespace_and_comments();
        self.begin_token();

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '\n' => self.make_token(TokenKind::NewLine, "\n"),
            '(' => self.make_token(TokenKind::LParen, "("),
            ')' => self.make_token(TokenKind::RParen, ")"),
            '{' => self.make_token(TokenKind::LBrace, "{"),
            '}' => self.make_token(TokenKind::RBrace, "}"),
            ',' => self.make_token(TokenKind::Comma, ","),
            '&' => self.make_token(TokenKind::Ampersand, "&"),
            '$' => self.make_token(TokenKind::Dollar, "$"),
            ':' => {
                if self.peek() == Some(&':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon, "::")
                } else {
                    self.make_token(TokenKind::Colon, ":")
                }
            }
            '/' if self.peek() == Some(&'*') => {
                self.advance();
                self.in_comment = true;
                self.make_token(TokenKind::BeginScopeComment, "/*")
            }
            '-' if self.peek().map(|c| is_digit(*c)).unwrap_or(false) => scan_number(self, c),
            c if is_digit(c) => scan_number(self, c),
            '"' => scan_string(self),
            c if is_identifier_start(c) => self.scan_identifier(c)?,
            c => return Err(self.error(format!("unexpected character '{}'", c))),
        };

        self.resolve_pending_import(token).map(Some)
    }

    /// Scan identifier token
    fn scan_identifier(
        &mut self,
        first_char: char,
    ) -> Result<Token, SyntaxError> {
        let mut value = String::new();
        value.push(first_char);

        while let Some(&c) = self.peek() {
            if is_identifier_char(c) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if value == "__c" {
            return scan_inline_c(self);
        }

        match self.state.keyword_from_str(&value) {
            Some(kind) => Ok(self.make_token(kind, value)),
            None => Ok(self.make_token(TokenKind::Identifier, value)),
        }
    }

    /// Turn the literal following `use` into a resolved `module` token
    fn resolve_pending_import(
        &mut self,
        token: Token,
    ) -> Result<Token, SyntaxError> {
        if token.kind == TokenKind::Use {
            self.state.awaiting_module = true;
            return Ok(token);
        }
        if !self.state.awaiting_module {
            return Ok(token);
        }
        self.state.awaiting_module = false;

        if !matches!(token.kind, TokenKind::StringLiteral | TokenKind::Identifier) {
            return Ok(token);
        }

        let path = self
            .resolver
            .resolve(self.filepath, &token.literal)
            .map_err(|err| SyntaxError::at(err.to_string(), self.filepath, token.span))?;
        tracing::debug!("found module '{}': {}", token.literal, path.display());

        let literal = path.display().to_string();
        self.submodules.push(path);
        Ok(Token::new(TokenKind::Module, literal, token.span))
    }

    /// Create token with current span
    pub fn make_token(
        &self,
        kind: TokenKind,
        literal: impl Into<String>,
    ) -> Token {
        Token::new(kind, literal, self.span())
    }
}
