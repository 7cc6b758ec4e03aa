//! Shared foundational types used across the tbforge toolchain.
//!
//! This crate provides clock frequencies, simulation time units, and VHDL
//! identifier helpers used by the config, parser, and harness crates.

#![warn(missing_docs)]

pub mod frequency;
pub mod ident;
pub mod time_unit;

pub use frequency::{Frequency, ParseFrequencyError};
pub use ident::{eq_ignore_case, is_basic_identifier};
pub use time_unit::{delay_literal, ParseTimeUnitError, TimeUnit};
