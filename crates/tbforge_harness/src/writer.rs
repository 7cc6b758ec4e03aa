//! Indented line writer for generated VHDL.

const INDENT: &str = "    ";

/// Accumulates generated text one line at a time.
///
/// The whole artifact is built in memory and written to disk once by the
/// caller.
#[derive(Debug, Default)]
pub struct VhdlWriter {
    out: String,
    depth: usize,
}

impl VhdlWriter {
    /// Creates an empty writer at depth zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `text` at the current depth followed by a newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Increases the depth by one level.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decreases the depth by one level.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes each item on its own line, separating items with `sep` and
    /// leaving the last one bare.
    pub fn separated<S: AsRef<str>>(&mut self, items: &[S], sep: &str) {
        for line in separated(items, sep) {
            self.line(line);
        }
    }

    /// Returns the text written so far.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Appends `sep` to every item except the last.
pub fn separated<S: AsRef<str>>(items: &[S], sep: &str) -> Vec<String> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i < last {
                format!("{}{sep}", item.as_ref())
            } else {
                item.as_ref().to_string()
            }
        })
        .collect()
}
