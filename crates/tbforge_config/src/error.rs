//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `tbforge.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The configuration asks for an output language the generator cannot emit.
    #[error("unsupported bench language '{0}' (only \"vhdl\" is supported)")]
    UnsupportedLanguage(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
