//! 诊断输出模块

pub mod text;

pub use text::{EmitterConfig, TextEmitter};
