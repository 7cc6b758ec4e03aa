//! A loaded declaration file.

use crate::file_id::FileId;
use std::path::{Path, PathBuf};

/// A declaration file held by the [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// The identifier of this file within its database.
    pub id: FileId,
    /// The filesystem path (or a synthetic name for in-memory text).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
}

impl SourceFile {
    /// Creates a new `SourceFile`.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        Self { id, path, content }
    }

    /// Returns the path this file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterates over `(line_number, text)` pairs, numbering from 1.
    ///
    /// Line terminators (`\n` or `\r\n`) are not included in the text.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.content
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx as u32 + 1, text))
    }

    /// Returns the text of the given 1-based line, if it exists.
    pub fn line(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.content.lines().nth(line as usize - 1)
    }
}
