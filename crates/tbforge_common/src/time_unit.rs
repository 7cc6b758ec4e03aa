//! Simulation time units used when writing delays into generated code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A VHDL physical time unit.
///
/// Generated harnesses express delays (the clock toggle in particular) as a
/// number followed by one of these units, e.g. `5 ns`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Femtoseconds.
    Fs,
    /// Picoseconds.
    Ps,
    /// Nanoseconds (default).
    #[default]
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
}

impl TimeUnit {
    /// Returns the length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Fs => 1e-15,
            TimeUnit::Ps => 1e-12,
            TimeUnit::Ns => 1e-9,
            TimeUnit::Us => 1e-6,
            TimeUnit::Ms => 1e-3,
            TimeUnit::S => 1.0,
        }
    }

    /// Returns the length of one unit in femtoseconds.
    pub fn femtoseconds(self) -> u64 {
        match self {
            TimeUnit::Fs => 1,
            TimeUnit::Ps => 1_000,
            TimeUnit::Ns => 1_000_000,
            TimeUnit::Us => 1_000_000_000,
            TimeUnit::Ms => 1_000_000_000_000,
            TimeUnit::S => 1_000_000_000_000_000,
        }
    }

    /// Returns the VHDL spelling of the unit.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Fs => "fs",
            TimeUnit::Ps => "ps",
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "sec",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes a delay of `fs` femtoseconds as a VHDL physical literal in `unit`.
///
/// The literal is exact: an integer when `fs` is a whole number of units,
/// otherwise a decimal with as many fraction digits as needed (at most down
/// to femtoseconds).
///
/// ```
/// use tbforge_common::{delay_literal, TimeUnit};
///
/// assert_eq!(delay_literal(5_000_000, TimeUnit::Ns), "5 ns");
/// assert_eq!(delay_literal(5_000_000, TimeUnit::S), "0.000000005 sec");
/// ```
pub fn delay_literal(fs: u64, unit: TimeUnit) -> String {
    let scale = unit.femtoseconds();
    let whole = fs / scale;
    let frac = fs % scale;
    if frac == 0 {
        return format!("{whole} {unit}");
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{} {unit}", digits.trim_end_matches('0'))
}

/// Error returned for an unrecognized time unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time unit '{0}' (use fs, ps, ns, us, ms, or s)")]
pub struct ParseTimeUnitError(pub String);

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fs" => Ok(TimeUnit::Fs),
            "ps" => Ok(TimeUnit::Ps),
            "ns" => Ok(TimeUnit::Ns),
            "us" => Ok(TimeUnit::Us),
            "ms" => Ok(TimeUnit::Ms),
            "s" | "sec" => Ok(TimeUnit::S),
            _ => Err(ParseTimeUnitError(s.to_string())),
        }
    }
}
