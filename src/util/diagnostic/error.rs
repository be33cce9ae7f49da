//! 诊断数据结构
//!
//! 所有阶段（词法、语法、语义、工具链）的错误最终都转换为 `Diagnostic`，
//! 由 [`TextEmitter`](super::emitter::TextEmitter) 统一渲染。

use std::fmt;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 诊断信息
///
/// `line == 0` 表示没有源码位置（例如缺少入口函数、工具链失败）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 严重级别
    pub severity: Severity,
    /// 完整消息
    pub message: String,
    /// 源文件路径
    pub filepath: Option<String>,
    /// 行号（1-indexed，0 表示无位置）
    pub line: usize,
    /// 列号（1-indexed）
    pub column: usize,
}

impl Diagnostic {
    /// 创建带位置的错误诊断
    pub fn error(
        message: impl Into<String>,
        filepath: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            filepath: Some(filepath.into()),
            line,
            column,
        }
    }

    /// 创建无位置的错误诊断
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            filepath: None,
            line: 0,
            column: 0,
        }
    }

    /// 是否带有可回显的源码位置
    pub fn has_location(&self) -> bool {
        self.filepath.is_some() && self.line > 0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match (&self.filepath, self.line) {
            (Some(path), line) if line > 0 => write!(
                f,
                "{}:{}:{}: {}: {}",
                path, line, self.column, self.severity, self.message
            ),
            _ => write!(f, "quadrate: {}: {}", self.severity, self.message),
        }
    }
}
