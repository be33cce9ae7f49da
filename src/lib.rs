//! Quadrate Programming Language
//!
//! An ahead-of-time compiler for a small stack-based language. Sources are
//! lexed, parsed and checked, lowered to C and linked by the system compiler.
//!
//! # Example
//!
//! ```quadrate
//! fn main() {
//!     push 1 2
//!     add
//!     print
//! }
//! ```
//!
//! ```no_run
//! use std::path::PathBuf;
//! use quadrate::util::config::Config;
//!
//! let artifact = quadrate::build(&[PathBuf::from("main.qd")], Config::default())?;
//! println!("built {}", artifact.display());
//! # Ok::<(), quadrate::CompileError>(())
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod driver;
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

use std::path::PathBuf;

pub use driver::{CompileError, Compiler};

use crate::frontend::module::Resolver;
use crate::frontend::TranslationUnit;
use crate::util::config::Config;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Quadrate";

/// Compile `seeds` into an executable, resolving imports from `QUADRATE_ROOT`
pub fn build(
    seeds: &[PathBuf],
    config: Config,
) -> Result<PathBuf, CompileError> {
    tracing::debug!("{} {}: building {} sources", NAME, VERSION, seeds.len());
    Compiler::new(config, Resolver::from_env()).build(seeds)
}

/// Lex and parse `seeds` and their imports without generating code
pub fn compile(
    seeds: &[PathBuf],
    config: Config,
) -> Result<Vec<TranslationUnit>, CompileError> {
    Compiler::new(config, Resolver::from_env()).compile(seeds)
}
