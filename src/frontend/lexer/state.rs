//! Lexer state management
//! Handles keyword recognition and the pending `use` import

use crate::frontend::lexer::tokens::{JumpKind, TokenKind};

/// Lexer state management
#[derive(Debug, Default)]
pub struct LexerState {
    /// Set after a `use` keyword until its module literal is consumed
    pub awaiting_module: bool,
}

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert string to keyword token
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        match s {
            // Declarations
            "fn" => Some(TokenKind::FnSignature),
            "use" => Some(TokenKind::Use),
            "const" => Some(TokenKind::Const),
            "local" => Some(TokenKind::Local),
            "defer" => Some(TokenKind::Defer),

            // Control flow
            "return" => Some(TokenKind::Return),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "end" => Some(TokenKind::End),
            "for" => Some(TokenKind::For),
            "loop" => Some(TokenKind::Loop),
            "reduce" => Some(TokenKind::Reduce),

            // Jumps
            _ => JumpKind::ALL
                .iter()
                .find(|kind| kind.mnemonic() == s)
                .map(|kind| TokenKind::Jump(*kind)),
        }
    }
}
