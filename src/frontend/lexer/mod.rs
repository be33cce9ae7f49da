//! Lexer module
//!
//! Turns one `.qd` file into a token stream and resolves its `use` imports.
//!
//! - [`tokens`] - token kinds and jump mnemonics
//! - [`state`] - keyword table and pending-import state
//! - [`tokenizer`] - the character-at-a-time [`Lexer`]
//! - [`literals`] - number, string and inline C scanners

pub mod literals;
pub mod state;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::frontend::error::SyntaxError;
use crate::frontend::module::Resolver;
use crate::util::span::{Position, Span};

pub use tokenizer::Lexer;
pub use tokens::{JumpKind, Token, TokenKind};

static MACRO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(LINE|FILE)\b").expect("macro pattern is valid"));

/// Result of lexing one file
#[derive(Debug, Clone)]
pub struct LexOutput {
    /// Tokens, always terminated by a single `Eof`
    pub tokens: Vec<Token>,
    /// Absolute paths of imported modules, in import order
    pub submodules: Vec<PathBuf>,
}

/// Tokenize a source file
pub fn lex(
    filepath: &Path,
    source: &[u8],
    resolver: &mut Resolver,
) -> Result<LexOutput, SyntaxError> {
    let text = decode(filepath, source)?;
    let expanded = expand_macros(filepath, text);

    tracing::debug!("lexing {} ({} bytes)", filepath.display(), expanded.len());

    let mut lexer = Lexer::new(filepath, &expanded, resolver);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        log_token(&token);
        tokens.push(token);
    }

    let end = lexer.position();
    tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));
    let submodules = lexer.into_submodules();

    tracing::debug!(
        "lexed {}: {} tokens, {} imports",
        filepath.display(),
        tokens.len(),
        submodules.len()
    );

    Ok(LexOutput { tokens, submodules })
}

/// Validate UTF-8, reporting the first bad byte
fn decode<'s>(
    filepath: &Path,
    source: &'s [u8],
) -> Result<&'s str, SyntaxError> {
    std::str::from_utf8(source).map_err(|err| {
        let valid = &source[..err.valid_up_to()];
        let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
        let line_start = valid
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let column = String::from_utf8_lossy(&valid[line_start..]).chars().count() + 1;
        SyntaxError::at(
            "invalid UTF-8 in source file",
            filepath,
            Span::point(Position::with_offset(line, column, err.valid_up_to())),
        )
    })
}

/// Substitute `#LINE` and `#FILE` on every physical line
pub fn expand_macros<'s>(
    filepath: &Path,
    source: &'s str,
) -> Cow<'s, str> {
    if !MACRO_PATTERN.is_match(source) {
        return Cow::Borrowed(source);
    }

    let quoted_file = format!(
        "\"{}\"",
        filepath
            .display()
            .to_string()
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
    );

    let mut out = String::with_capacity(source.len());
    for (index, line) in source.split_inclusive('\n').enumerate() {
        let line_number = (index + 1).to_string();
        let replaced = MACRO_PATTERN.replace_all(line, |caps: &Captures<'_>| {
            if &caps[1] == "LINE" {
                line_number.clone()
            } else {
                quoted_file.clone()
            }
        });
        out.push_str(&replaced);
    }
    Cow::Owned(out)
}

/// Log a token for debugging
fn log_token(token: &Token) {
    match token.kind {
        TokenKind::NewLine => tracing::trace!("{}: new_line", token.span.start),
        TokenKind::InlineC => {
            tracing::trace!("{}: inline_c ({} bytes)", token.span.start, token.literal.len())
        }
        kind => tracing::trace!("{}: {:?} '{}'", token.span.start, kind, token.literal),
    }
}
