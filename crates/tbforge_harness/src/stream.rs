//! Cycle model of the generated valid/frame-end generator.
//!
//! [`StreamSchedule`] steps the same counters the `fi_sim` process keeps, one
//! rising edge at a time after reset is released, so the pulse pattern of a
//! generated harness can be checked without a simulator.

use crate::error::HarnessError;
use tbforge_config::MAX_FRAME_SIZE;

/// The strobes after one rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamPulse {
    /// `s_axis_tvalid`.
    pub valid: bool,
    /// `s_axis_tlast`.
    pub last: bool,
}

/// Prescaler and frame length of the stream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSchedule {
    prescaler: u32,
    frame_size: u32,
}

impl StreamSchedule {
    /// Creates a schedule. `prescaler` must be at least 1 and `frame_size`
    /// between 1 and the frame counter's capacity.
    pub fn new(prescaler: u32, frame_size: u32) -> Result<Self, HarnessError> {
        if prescaler == 0 {
            return Err(HarnessError::InvalidStream(
                "prescaler must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_FRAME_SIZE).contains(&frame_size) {
            return Err(HarnessError::InvalidStream(format!(
                "frame size must be between 1 and {MAX_FRAME_SIZE}, got {frame_size}"
            )));
        }
        Ok(Self {
            prescaler,
            frame_size,
        })
    }

    /// Cycles between two valid pulses.
    pub fn valid_period(&self) -> u64 {
        u64::from(self.prescaler)
    }

    /// Cycles between two frame-end pulses.
    pub fn frame_period(&self) -> u64 {
        u64::from(self.prescaler) * u64::from(self.frame_size)
    }

    /// Iterates over the strobes after each rising edge, starting with the
    /// first edge after reset.
    pub fn pulses(&self) -> Pulses {
        Pulses {
            schedule: *self,
            prescaler_cnt: 0,
            tlast_cnt: 0,
        }
    }
}

/// Endless iterator returned by [`StreamSchedule::pulses`].
#[derive(Debug, Clone)]
pub struct Pulses {
    schedule: StreamSchedule,
    prescaler_cnt: u32,
    tlast_cnt: u32,
}

impl Iterator for Pulses {
    type Item = StreamPulse;

    fn next(&mut self) -> Option<StreamPulse> {
        let mut pulse = StreamPulse::default();
        if self.prescaler_cnt < self.schedule.prescaler - 1 {
            self.prescaler_cnt += 1;
        } else {
            self.prescaler_cnt = 0;
            pulse.valid = true;
            if self.tlast_cnt < self.schedule.frame_size - 1 {
                self.tlast_cnt += 1;
            } else {
                self.tlast_cnt = 0;
                pulse.last = true;
            }
        }
        Some(pulse)
    }
}
