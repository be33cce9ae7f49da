//! Code generation
//!
//! This module handles the transformation from the parsed AST to C.

pub mod codegen;

pub use codegen::{CGenerator, CodegenError, GeneratedUnit};
