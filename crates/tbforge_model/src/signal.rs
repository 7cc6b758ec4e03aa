//! Ports and synthesized harness wires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port direction. Only the two directions the harness can drive or observe
/// are modeled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Driven from outside the entity.
    In,
    /// Driven by the entity.
    Out,
}

impl Direction {
    /// Returns the VHDL mode keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bit width of a vector signal.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// A width computed from a literal range such as `(7 downto 0)`.
    Resolved(u32),
    /// A range that refers to a generic, e.g. `(WIDTH-1 downto 0)`.
    ///
    /// Holds the range text as written. It cannot size another signal.
    Unresolved(String),
}

impl Width {
    /// Returns the number of bits if the width is a literal.
    pub fn bits(&self) -> Option<u32> {
        match self {
            Width::Resolved(bits) => Some(*bits),
            Width::Unresolved(_) => None,
        }
    }
}

/// Scalar or vector. Vectors always carry a [`Width`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// A single `std_logic` bit.
    Scalar,
    /// A `std_logic_vector` of the given width.
    Vector(Width),
}

impl SignalKind {
    /// Returns `true` for vectors.
    pub fn is_vector(&self) -> bool {
        matches!(self, SignalKind::Vector(_))
    }

    /// Returns `true` if both kinds are scalar, or both are vectors of any width.
    pub fn same_class(&self, other: &SignalKind) -> bool {
        self.is_vector() == other.is_vector()
    }

    /// Returns the vector width, or `None` for scalars.
    pub fn width(&self) -> Option<&Width> {
        match self {
            SignalKind::Scalar => None,
            SignalKind::Vector(width) => Some(width),
        }
    }
}

/// A named, directional wire: either a declared port or a harness signal.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Signal {
    name: String,
    direction: Direction,
    kind: SignalKind,
    mapped: bool,
}

impl Signal {
    /// Creates an unmapped signal.
    pub fn new(name: impl Into<String>, direction: Direction, kind: SignalKind) -> Self {
        Self {
            name: name.into(),
            direction,
            kind,
            mapped: false,
        }
    }

    /// Creates an unmapped scalar signal.
    pub fn scalar(name: impl Into<String>, direction: Direction) -> Self {
        Self::new(name, direction, SignalKind::Scalar)
    }

    /// Creates an unmapped vector signal.
    pub fn vector(name: impl Into<String>, direction: Direction, width: Width) -> Self {
        Self::new(name, direction, SignalKind::Vector(width))
    }

    /// The signal name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signal direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The signal kind (and width for vectors).
    pub fn kind(&self) -> &SignalKind {
        &self.kind
    }

    /// Returns `true` once the signal has been paired with a counterpart.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Records that the signal has been paired with a counterpart.
    pub fn mark_mapped(&mut self) {
        self.mapped = true;
    }

    /// Returns a copy with a new name and direction but the same kind.
    pub fn renamed(&self, name: impl Into<String>, direction: Direction) -> Signal {
        Signal::new(name, direction, self.kind.clone())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ", self.name, self.direction)?;
        match &self.kind {
            SignalKind::Scalar => write!(f, "std_logic"),
            SignalKind::Vector(Width::Resolved(bits)) => {
                write!(f, "std_logic_vector({} downto 0)", bits.saturating_sub(1))
            }
            SignalKind::Vector(Width::Unresolved(range)) => {
                write!(f, "std_logic_vector({range})")
            }
        }
    }
}
