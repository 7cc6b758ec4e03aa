//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code, displayed as prefix + 3 digits (e.g. `W001`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// A declaration line inside a port or generic list could not be interpreted.
pub const MALFORMED_LINE: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A device-under-test file has an extension the parser does not handle.
pub const UNSUPPORTED_FILE_TYPE: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);

/// An unrecognized command-line flag was ignored.
pub const UNKNOWN_FLAG: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

/// An instantiated entity still has ports or generics without a counterpart.
pub const NOT_FULLY_WIRED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
