//! 统一诊断系统
//!
//! 提供错误诊断的数据结构与文本渲染。
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity)
//! - [`emitter`] - 文本渲染器 (`file:line:col: error: message` + 源码回显 + 插入符)

pub mod emitter;
pub mod error;

// 重新导出
pub use emitter::{EmitterConfig, TextEmitter};
pub use error::{Diagnostic, Severity};
