//! 诊断渲染器

use owo_colors::OwoColorize;

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 指示字符 (默认: "^")
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            indicator: '^',
        }
    }
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    /// 创建新的文本渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 渲染单个诊断（不回显源码）
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render_with_source(diagnostic, None)
    }

    /// 渲染诊断到指定源码文件
    pub fn render_with_source(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);
        output.push('\n');

        if self.config.show_source && diagnostic.has_location() {
            if let Some(snippet) = source_file.and_then(|sf| self.render_snippet(diagnostic, sf)) {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// 读取诊断所在文件并渲染；文件不可读时仅输出头部
    pub fn render_from_disk(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let source_file = diagnostic.filepath.as_ref().and_then(|path| {
            std::fs::read_to_string(path)
                .ok()
                .map(|content| SourceFile::new(path.clone(), content))
        });
        self.render_with_source(diagnostic, source_file.as_ref())
    }

    /// `file:line:col: error: message`
    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let location = match (&diagnostic.filepath, diagnostic.line) {
            (Some(path), line) if line > 0 => format!("{}:{}:{}:", path, line, diagnostic.column),
            _ => "quadrate:".to_string(),
        };
        let severity = format!("{}:", diagnostic.severity);

        if !self.config.use_colors {
            return format!("{} {} {}", location, severity, diagnostic.message);
        }

        let severity = match diagnostic.severity {
            Severity::Error => severity.red().bold().to_string(),
        };
        format!("{} {} {}", location.bold(), severity, diagnostic.message)
    }

    /// 源码行回显 + 插入符
    fn render_snippet(
        &self,
        diagnostic: &Diagnostic,
        source_file: &SourceFile,
    ) -> Option<String> {
        let line = source_file.line(diagnostic.line)?;
        let gutter = diagnostic.line.to_string();

        // Tabs are kept so the caret lines up with the echoed source.
        let padding: String = line
            .chars()
            .take(diagnostic.column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();

        let indicator = if self.config.use_colors {
            self.config.indicator.red().bold().to_string()
        } else {
            self.config.indicator.to_string()
        };

        Some(format!(
            "{} | {}\n{} | {}{}\n",
            gutter,
            line,
            " ".repeat(gutter.len()),
            padding,
            indicator
        ))
    }
}
