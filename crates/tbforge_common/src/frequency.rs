//! Clock frequencies with unit parsing, display, and period conversion.

use crate::time_unit::TimeUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FS_PER_SECOND: f64 = 1e15;

/// A clock frequency stored in Hertz.
///
/// Parses strings like "100MHz", "250KHz", "1GHz", "48000Hz", and bare
/// numbers (taken as Hz). Displays using the largest unit that keeps the
/// value at or above one.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// Creates a new frequency from a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a value in megahertz.
    pub fn from_mhz(mhz: f64) -> Self {
        Self(mhz * 1_000_000.0)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Returns `true` if this frequency can drive a clock (finite and above zero).
    pub fn is_usable(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns the full clock period expressed in `unit`.
    pub fn period_in(&self, unit: TimeUnit) -> f64 {
        1.0 / self.0 / unit.seconds()
    }

    /// Returns half of the clock period expressed in `unit`.
    ///
    /// This is the toggle delay of a free-running clock: `1 / (2 * f)`.
    pub fn half_period_in(&self, unit: TimeUnit) -> f64 {
        1.0 / (2.0 * self.0) / unit.seconds()
    }

    /// Returns half of the clock period in whole femtoseconds, rounded to the
    /// nearest one.
    ///
    /// `None` if the frequency is unusable or so high that the half period
    /// rounds to zero.
    pub fn half_period_fs(&self) -> Option<u64> {
        if !self.is_usable() {
            return None;
        }
        let fs = (FS_PER_SECOND / (2.0 * self.0)).round();
        (fs >= 1.0 && fs < u64::MAX as f64).then_some(fs as u64)
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000.0 {
            write!(f, "{}GHz", hz / 1_000_000_000.0)
        } else if hz >= 1_000_000.0 {
            write!(f, "{}MHz", hz / 1_000_000.0)
        } else if hz >= 1_000.0 {
            write!(f, "{}KHz", hz / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error returned when a frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (number, scale) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, 1_000_000_000.0)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1_000_000.0)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1_000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let val: f64 = number.trim().parse().map_err(|_| err())?;
        Ok(Frequency(val * scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_suffixed_values() {
        assert_eq!("1GHz".parse::<Frequency>().unwrap().hz(), 1_000_000_000.0);
        assert_eq!("100MHz".parse::<Frequency>().unwrap().hz(), 100_000_000.0);
        assert_eq!("250KHz".parse::<Frequency>().unwrap().hz(), 250_000.0);
        assert_eq!("48000Hz".parse::<Frequency>().unwrap().hz(), 48_000.0);
    }

    #[test]
    fn parse_bare_number_and_case() {
        assert_eq!("25000000".parse::<Frequency>().unwrap().hz(), 25_000_000.0);
        assert_eq!("50mhz".parse::<Frequency>().unwrap().mhz(), 50.0);
        assert_eq!(" 10 MHz ".parse::<Frequency>().unwrap().mhz(), 10.0);
    }

    #[test]
    fn parse_invalid() {
        let err = "fast".parse::<Frequency>().unwrap_err();
        assert_eq!(err.to_string(), "invalid frequency: 'fast'");
    }

    #[test]
    fn half_period_of_100mhz_is_5ns() {
        let f = Frequency::from_mhz(100.0);
        assert!((f.half_period_in(TimeUnit::Ns) - 5.0).abs() < 1e-9);
        assert!((f.half_period_in(TimeUnit::Ps) - 5_000.0).abs() < 1e-6);
        assert!((f.period_in(TimeUnit::Ns) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn half_period_in_femtoseconds() {
        assert_eq!(Frequency::from_mhz(100.0).half_period_fs(), Some(5_000_000));
        assert_eq!(Frequency::from_mhz(3.0).half_period_fs(), Some(166_666_667));
        assert_eq!(Frequency::new(1.0).half_period_fs(), Some(500_000_000_000_000));
        assert_eq!(Frequency::new(1e16).half_period_fs(), None);
        assert_eq!(Frequency::new(0.0).half_period_fs(), None);
        assert_eq!(Frequency::new(f64::NAN).half_period_fs(), None);
    }

    #[test]
    fn usable() {
        assert!(Frequency::from_mhz(1.0).is_usable());
        assert!(!Frequency::new(0.0).is_usable());
        assert!(!Frequency::new(-3.0).is_usable());
    }

    #[test]
    fn display_selects_best_unit() {
        assert_eq!(Frequency::new(1_000_000_000.0).to_string(), "1GHz");
        assert_eq!(Frequency::new(100_000_000.0).to_string(), "100MHz");
        assert_eq!(Frequency::new(44_100.0).to_string(), "44.1KHz");
        assert_eq!(Frequency::new(500.0).to_string(), "500Hz");
    }
}
