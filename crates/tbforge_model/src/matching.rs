//! Name/kind matching used to decide what gets wired to what.
//!
//! Two signals match when their names are equal and both are scalars or both
//! are vectors. Direction and width are ignored, so a same-named output can
//! satisfy an input and an 8-bit vector can satisfy a 16-bit one. Generics
//! match on name and type.

use crate::generic::Generic;
use crate::interface::Interface;
use crate::signal::Signal;

/// Anything that can be paired with a same-named counterpart.
pub trait Matchable {
    /// The name used for pairing.
    fn match_name(&self) -> &str;

    /// Returns `true` if `self` and `other` should be connected.
    ///
    /// Implementations must be reflexive and symmetric.
    fn matches(&self, other: &Self) -> bool;
}

impl Matchable for Signal {
    fn match_name(&self) -> &str {
        self.name()
    }

    fn matches(&self, other: &Self) -> bool {
        self.name() == other.name() && self.kind().same_class(other.kind())
    }
}

impl Matchable for Generic {
    fn match_name(&self) -> &str {
        self.name()
    }

    fn matches(&self, other: &Self) -> bool {
        self.name() == other.name() && self.ty() == other.ty()
    }
}

/// Returns `true` if `a` and `b` match.
pub fn matches<T: Matchable>(a: &T, b: &T) -> bool {
    a.matches(b)
}

/// Returns the first candidate matching `item`, scanning in order.
pub fn find_counterpart<'a, T, I>(candidates: I, item: &T) -> Option<&'a T>
where
    T: Matchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    candidates.into_iter().find(|c| c.matches(item))
}

/// Returns `true` if any candidate matches `item`.
pub fn has_counterpart<'a, T, I>(candidates: I, item: &T) -> bool
where
    T: Matchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    find_counterpart(candidates, item).is_some()
}

impl Interface {
    /// Returns `true` if some port of `self` matches `signal`.
    pub fn has_signal(&self, signal: &Signal) -> bool {
        has_counterpart(self.ports(), signal)
    }

    /// Returns `true` if some generic of `self` matches `generic`.
    pub fn has_generic(&self, generic: &Generic) -> bool {
        has_counterpart(self.generics(), generic)
    }
}
