//! Generic parameters of an entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a generic parameter.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenericType {
    /// `std_logic`. Every parsed generic gets this type.
    Scalar,
    /// `std_logic_vector`.
    Vector,
    /// Any other named type (`natural`, `boolean`, ...).
    Named(String),
}

impl GenericType {
    /// Returns the default value literal for this type.
    pub fn default_literal(&self) -> String {
        match self {
            GenericType::Scalar => "'0'".to_string(),
            GenericType::Vector => "(others => '0')".to_string(),
            GenericType::Named(name) => match name.to_ascii_lowercase().as_str() {
                "natural" | "integer" => "0".to_string(),
                "positive" => "1".to_string(),
                "boolean" => "false".to_string(),
                "real" => "0.0".to_string(),
                "time" => "0 ns".to_string(),
                "string" => "\"\"".to_string(),
                _ => "'0'".to_string(),
            },
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericType::Scalar => f.write_str("std_logic"),
            GenericType::Vector => f.write_str("std_logic_vector"),
            GenericType::Named(name) => f.write_str(name),
        }
    }
}

/// A named, typed, defaulted compile-time parameter.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Generic {
    name: String,
    ty: GenericType,
    default: String,
    mapped: bool,
}

impl Generic {
    /// Creates a scalar generic with the scalar default `'0'`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_type(name, GenericType::Scalar)
    }

    /// Creates a generic of the given type with that type's default literal.
    pub fn with_type(name: impl Into<String>, ty: GenericType) -> Self {
        let default = ty.default_literal();
        Self {
            name: name.into(),
            ty,
            default,
            mapped: false,
        }
    }

    /// Replaces the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// The generic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The generic type.
    pub fn ty(&self) -> &GenericType {
        &self.ty
    }

    /// The default value literal.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Returns `true` once the generic has been paired with a counterpart.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Records that the generic has been paired with a counterpart.
    pub fn mark_mapped(&mut self) {
        self.mapped = true;
    }
}

impl fmt::Display for Generic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} := {}", self.name, self.ty, self.default)
    }
}
