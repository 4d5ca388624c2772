//! Prefix-aware string builder for tree output.
//!
//! Every line ends with `\n`. Tree lines are `{prefix}{connector}{text}`.

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const SPACE: &str = "    ";

pub struct TreeWriter {
    buf: String,
}

impl TreeWriter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
        }
    }

    /// Write a complete line (appends newline).
    pub fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write one tree entry under `prefix`.
    pub fn branch(&mut self, prefix: &str, is_last: bool, text: &str) {
        self.buf.push_str(prefix);
        self.buf.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write a horizontal rule of `width` `=` characters.
    pub fn rule(&mut self, width: usize) {
        self.line(&"=".repeat(width));
    }

    /// Consume the writer and return the rendered text.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for TreeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix for the children of an entry drawn under `prefix`.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    let mut next = String::with_capacity(prefix.len() + PIPE.len());
    next.push_str(prefix);
    next.push_str(if is_last { SPACE } else { PIPE });
    next
}
