//! Line-granular source locations.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A 1-based line within a loaded file.
///
/// The declaration parser works line by line, so diagnostics only ever need
/// to point at a whole line rather than a byte range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The file the line belongs to.
    pub file: FileId,
    /// The 1-based line number.
    pub line: u32,
}

impl Location {
    /// A location that points nowhere (command-line or generated input).
    pub const DUMMY: Location = Location {
        file: FileId::DUMMY,
        line: 0,
    };

    /// Creates a location for `line` (1-based) of `file`.
    pub fn new(file: FileId, line: u32) -> Self {
        Self { file, line }
    }

    /// Returns `true` if this location does not refer to a loaded file.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy() {
        assert!(Location::DUMMY.is_dummy());
        assert!(!Location::new(FileId::from_raw(0), 4).is_dummy());
    }
}
