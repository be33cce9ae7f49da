//! Frontend compilation pipeline
//!
//! Source text to validated modules: the lexer resolves imports and produces
//! tokens, the parser builds a [`parser::ProgramModule`] per file, and the
//! semantic analyzer checks every reference across all translation units.

pub mod error;
pub mod lexer;
pub mod module;
pub mod parser;
pub mod semantic;
pub mod translation_unit;

pub use error::{SemanticError, SyntaxError};
pub use translation_unit::TranslationUnit;
