//! Parser module
//!
//! Recursive-descent parser turning one file's tokens into a [`ProgramModule`].

pub mod ast;
pub mod parser_state;
pub mod statements;
#[cfg(test)]
mod tests;

use std::path::Path;

pub use ast::*;
pub use parser_state::ParserState;

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::Token;
use crate::frontend::module::module_name_for;

/// Parse tokens into a module
///
/// # Example
/// ```quadrate
/// fn main() {
///     push 1 2
///     add
/// }
/// ```
pub fn parse(
    filepath: &Path,
    tokens: &[Token],
) -> Result<ProgramModule, SyntaxError> {
    let mut state = ParserState::new(filepath, tokens);
    let (statements, imports) = statements::parse_top_level(&mut state)?;

    let module = ProgramModule {
        name: module_name_for(filepath),
        filepath: filepath.to_path_buf(),
        statements,
        imports,
    };

    tracing::debug!(
        "parsed {}: {} top-level statements, {} imports",
        filepath.display(),
        module.statements.len(),
        module.imports.len()
    );
    Ok(module)
}
