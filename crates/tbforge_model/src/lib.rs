//! Structural model of a parsed entity interface and the matching rules used
//! to wire two interfaces together.
//!
//! An [`Interface`] is built once by the declaration parser, its `mapped`
//! flags are set once while the harness is wired, and it is dropped after the
//! output artifact is written. Port and generic order is declaration order and
//! can only be extended by appending.

#![warn(missing_docs)]

pub mod generic;
pub mod interface;
pub mod matching;
pub mod signal;

pub use generic::{Generic, GenericType};
pub use interface::Interface;
pub use matching::{find_counterpart, has_counterpart, matches, Matchable};
pub use signal::{Direction, Signal, SignalKind, Width};
