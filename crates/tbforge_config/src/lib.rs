//! Parsing and validation of `tbforge.toml` harness configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`HarnessConfig`]: clock and time unit, stream generator
//! constants, the stimulus package, and the library list, which
//! [`resolve_libraries`] turns into the clauses written at the top of the
//! harness.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    discover_config, load_config, load_config_from_str, validate_config, CONFIG_FILE_NAME,
    MAX_FRAME_SIZE,
};
pub use resolve::{resolve_libraries, LibraryClause};
pub use types::*;
