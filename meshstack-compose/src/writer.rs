//! Line-oriented code writer with indentation tracking

const INDENT: &str = "    ";

/// Small append-only buffer for rendering generated source.
///
/// Indentation is applied by the `write_indented*` methods only; `write`
/// appends raw text so a line can be assembled from several pieces.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        debug_assert!(self.depth > 0, "outdent below zero");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Append raw text without indentation or newline.
    pub fn write(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append the current indentation followed by `text`, no newline.
    pub fn write_indented(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
    }

    /// Append a full indented line.
    pub fn write_indented_line(&mut self, line: &str) {
        self.write_indented(line);
        self.buf.push('\n');
    }

    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
