//! Error types for harness generation.

/// Errors that stop a harness from being generated.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A vector port's width depends on a generic, so no net can be sized for it.
    #[error("port '{port}' of '{entity}' has unresolved width '{expr}'; a companion signal cannot be sized")]
    UnresolvedWidth {
        /// The DUT entity name.
        entity: String,
        /// The port name.
        port: String,
        /// The range text as declared.
        expr: String,
    },

    /// A DUT declares no ports, so it has nothing to instantiate against.
    #[error("entity '{0}' declares no ports")]
    NoPorts(String),

    /// A DUT port needs a harness signal whose name is already taken by a
    /// signal of a different kind.
    #[error("port '{name}' of '{entity}' conflicts with an existing harness signal of the same name")]
    SignalConflict {
        /// The conflicting signal name.
        name: String,
        /// The DUT entity name.
        entity: String,
    },

    /// A harness or DUT name cannot be used as a VHDL identifier.
    #[error("'{0}' is not a valid VHDL identifier")]
    InvalidIdentifier(String),

    /// Stream generator constants are out of range.
    #[error("invalid stream settings: {0}")]
    InvalidStream(String),

    /// The configuration handed to the generator is not usable.
    #[error(transparent)]
    Config(#[from] tbforge_config::ConfigError),
}
