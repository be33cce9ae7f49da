//! Frontend diagnostics
//!
//! Both error kinds carry `{message, filepath, line, column}`; the first one
//! raised aborts the whole compilation.

use std::path::Path;

use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;

/// Lexer or parser failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filepath}:{line}:{column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub filepath: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    /// Error anchored at the start of `span`
    pub fn at(
        message: impl Into<String>,
        filepath: &Path,
        span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            filepath: filepath.display().to_string(),
            line: span.start.line,
            column: span.start.column,
        }
    }
}

/// Analyzer failure: redefinition, undefined reference, missing entry point
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filepath}:{line}:{column}: {message}")]
pub struct SemanticError {
    pub message: String,
    pub filepath: String,
    pub line: usize,
    pub column: usize,
}

impl SemanticError {
    /// Error anchored at the start of `span`
    pub fn at(
        message: impl Into<String>,
        filepath: &Path,
        span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            filepath: filepath.display().to_string(),
            line: span.start.line,
            column: span.start.column,
        }
    }

    /// Error with no source position
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filepath: String::new(),
            line: 0,
            column: 0,
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Diagnostic::error(err.message.clone(), err.filepath.clone(), err.line, err.column)
    }
}

impl From<&SemanticError> for Diagnostic {
    fn from(err: &SemanticError) -> Self {
        if err.line == 0 || err.filepath.is_empty() {
            Diagnostic::bare(err.message.clone())
        } else {
            Diagnostic::error(err.message.clone(), err.filepath.clone(), err.line, err.column)
        }
    }
}
