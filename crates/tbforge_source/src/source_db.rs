//! Owner of every declaration file read during a run.

use crate::file_id::FileId;
use crate::location::Location;
use crate::source_file::SourceFile;
use std::io;
use std::path::{Path, PathBuf};

/// The source database, owning all loaded declaration text.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory text under `name` (used for tests and stdin-like input).
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` was not produced by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the number of loaded files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Formats a location as `path:line`, or `None` for dummy locations.
    pub fn describe(&self, loc: Location) -> Option<String> {
        if loc.is_dummy() {
            return None;
        }
        let file = self.get_file(loc.file);
        Some(format!("{}:{}", file.path.display(), loc.line))
    }

    /// Returns the text of the line a location points at.
    pub fn line_text(&self, loc: Location) -> Option<&str> {
        if loc.is_dummy() {
            return None;
        }
        self.get_file(loc.file).line(loc.line)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
