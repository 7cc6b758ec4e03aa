//! Declaration file management and line locations for diagnostics.
//!
//! This crate provides the [`SourceDb`] that owns every declaration file read
//! during a run, [`FileId`] handles into it, and [`Location`] values that
//! point diagnostics at a 1-based line of a file.

#![warn(missing_docs)]

pub mod file_id;
pub mod location;
pub mod source_db;
pub mod source_file;

pub use file_id::FileId;
pub use location::Location;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
