//! Potentiometer filter: dead-band plus outlier rejection, one per channel.
//!
//! Two stages and no smoothing state:
//!
//! 1. **Dead-band.** A raw sample within `noise_threshold` of the last
//!    *accepted* raw sample is ignored outright (not counted as a reject).
//! 2. **Rate clamp.** The sample is mapped to an angle. If that angle is more
//!    than `outlier_threshold_deg` away from the servo's current position
//!    the sample is dropped as a spike and the reject counter goes up.
//!    Otherwise it is accepted and the counter resets.
//!
//! The servo position itself lives in the [`ServoBank`](crate::drivers::servo::ServoBank);
//! callers pass it in so a forced gripper angle is seen by the next sample.

use crate::config::SystemConfig;
use crate::drivers::servo::MAX_ANGLE;

/// Map a raw reading onto 0–180° with inverted polarity (`adc_max` → 0°).
/// Readings above `adc_max` are treated as `adc_max`.
pub fn raw_to_angle(raw: u16, adc_max: u16) -> u8 {
    if adc_max == 0 {
        return 0;
    }
    let max = u32::from(adc_max);
    let raw = u32::from(raw).min(max);
    ((max - raw) * u32::from(MAX_ANGLE) / max) as u8
}

/// What the filter decided about one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Inside the dead-band; nothing changes.
    Ignored,
    /// New position to write to the servo.
    Accepted { angle: u8 },
    /// Implausible jump; dropped. `report` is true on the samples that
    /// should produce a diagnostic line.
    Rejected {
        candidate: u8,
        previous: u8,
        count: u16,
        report: bool,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalogFilter {
    last_accepted_raw: u16,
    consecutive_rejects: u16,
}

impl AnalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one sample through both stages.
    ///
    /// `current` is the servo's present angle. On `Accepted` the caller
    /// must write the angle to the servo; the filter has already recorded
    /// `raw` as the new reference.
    pub fn update(&mut self, raw: u16, current: u8, cfg: &SystemConfig) -> FilterOutcome {
        if raw.abs_diff(self.last_accepted_raw) <= cfg.noise_threshold {
            return FilterOutcome::Ignored;
        }

        let candidate = raw_to_angle(raw, cfg.adc_max);
        if candidate.abs_diff(current) > cfg.outlier_threshold_deg {
            self.consecutive_rejects = self.consecutive_rejects.saturating_add(1);
            let every = cfg.reject_log_every.max(1);
            return FilterOutcome::Rejected {
                candidate,
                previous: current,
                count: self.consecutive_rejects,
                report: every == 1 || self.consecutive_rejects % every == 1,
            };
        }

        self.consecutive_rejects = 0;
        self.last_accepted_raw = raw;
        FilterOutcome::Accepted { angle: candidate }
    }

    pub fn last_accepted_raw(&self) -> u16 {
        self.last_accepted_raw
    }

    pub fn consecutive_rejects(&self) -> u16 {
        self.consecutive_rejects
    }
}
