//! 代码缓冲区
//!
//! Line-oriented C text buffer with tab indentation.

#[derive(Debug, Default)]
pub struct CBuffer {
    out: String,
    indent: usize,
}

impl CBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one indented line
    pub fn line(
        &mut self,
        text: &str,
    ) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write a line ending in `{` and indent what follows
    pub fn open(
        &mut self,
        text: &str,
    ) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedent and write a closing line
    pub fn close(
        &mut self,
        text: &str,
    ) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    /// Write text verbatim, without indentation
    pub fn raw(
        &mut self,
        text: &str,
    ) {
        self.out.push_str(text);
        if !text.ends_with('\n') {
            self.out.push('\n');
        }
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn finish(self) -> String {
        self.out
    }
}
