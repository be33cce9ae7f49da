//! Token types

use serde::Serialize;
use std::fmt;

use crate::util::span::Span;

/// Conditional and unconditional jump mnemonics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpKind {
    Jmp,
    Je,
    Jg,
    Jge,
    Jgz,
    Jgez,
    Jl,
    Jle,
    Jlz,
    Jlez,
    Jne,
    Jnz,
    Jz,
}

impl JumpKind {
    /// Every mnemonic, in keyword-table order
    pub const ALL: [JumpKind; 13] = [
        JumpKind::Jmp,
        JumpKind::Je,
        JumpKind::Jg,
        JumpKind::Jge,
        JumpKind::Jgz,
        JumpKind::Jgez,
        JumpKind::Jl,
        JumpKind::Jle,
        JumpKind::Jlz,
        JumpKind::Jlez,
        JumpKind::Jne,
        JumpKind::Jnz,
        JumpKind::Jz,
    ];

    /// Source mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            JumpKind::Jmp => "jmp",
            JumpKind::Je => "je",
            JumpKind::Jg => "jg",
            JumpKind::Jge => "jge",
            JumpKind::Jgz => "jgz",
            JumpKind::Jgez => "jgez",
            JumpKind::Jl => "jl",
            JumpKind::Jle => "jle",
            JumpKind::Jlz => "jlz",
            JumpKind::Jlez => "jlez",
            JumpKind::Jne => "jne",
            JumpKind::Jnz => "jnz",
            JumpKind::Jz => "jz",
        }
    }

    /// Number of stack operands popped before the branch
    pub fn operands(&self) -> usize {
        match self {
            JumpKind::Jmp => 0,
            JumpKind::Je
            | JumpKind::Jg
            | JumpKind::Jge
            | JumpKind::Jl
            | JumpKind::Jle
            | JumpKind::Jne => 2,
            JumpKind::Jgz
            | JumpKind::Jgez
            | JumpKind::Jlz
            | JumpKind::Jlez
            | JumpKind::Jnz
            | JumpKind::Jz => 1,
        }
    }

    /// C comparison operator, `None` for `jmp`
    pub fn comparison(&self) -> Option<&'static str> {
        match self {
            JumpKind::Jmp => None,
            JumpKind::Je | JumpKind::Jz => Some("=="),
            JumpKind::Jne | JumpKind::Jnz => Some("!="),
            JumpKind::Jg | JumpKind::Jgz => Some(">"),
            JumpKind::Jge | JumpKind::Jgez => Some(">="),
            JumpKind::Jl | JumpKind::Jlz => Some("<"),
            JumpKind::Jle | JumpKind::Jlez => Some("<="),
        }
    }
}

impl fmt::Display for JumpKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    DoubleColon,
    Comma,
    Ampersand,
    Dollar,

    // Literals
    NumericConstant,
    StringLiteral,
    /// Resolved `use` target; the literal is the absolute module path
    Module,

    // Keywords
    FnSignature,
    Use,
    Const,
    Local,
    Defer,
    Return,
    Break,
    Continue,
    End,
    For,
    Loop,
    Reduce,
    Jump(JumpKind),

    Identifier,
    NewLine,
    InlineC,
    BeginScopeComment,
    EndScopeComment,
    Eof,
}

impl TokenKind {
    /// Human readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::NumericConstant => "numeric constant",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Module => "module",
            TokenKind::Identifier => "identifier",
            TokenKind::NewLine => "new line",
            TokenKind::InlineC => "inline C block",
            TokenKind::BeginScopeComment | TokenKind::EndScopeComment => "comment",
            TokenKind::Eof => "end of input",
            _ => "token",
        }
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    /// Create a token
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// 1-based line of the first character
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// 1-based column of the first character
    pub fn column(&self) -> usize {
        self.span.start.column
    }

    pub fn is(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.kind == kind
    }
}
