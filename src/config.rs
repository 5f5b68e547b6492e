//! System configuration parameters
//!
//! All tunable thresholds and timings for the arm controller.
//! Values can be overridden via NVS (see [`ConfigStore`](crate::adapters::config_store::ConfigStore))
//! or directly in tests.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Mode button ---
    /// Settle window (ms) the button level must hold before a press counts
    pub debounce_ms: u32,

    // --- Potentiometer filter ---
    /// Raw ADC dead-band; changes of this size or smaller are ignored
    pub noise_threshold: u16,
    /// Largest plausible single-tick angle change (degrees)
    pub outlier_threshold_deg: u8,
    /// Log one rejected-sample notice per this many consecutive rejects
    pub reject_log_every: u16,
    /// Full-scale raw ADC reading (maps to 0°)
    pub adc_max: u16,

    // --- Servos ---
    /// Position written to every servo at startup (degrees)
    pub initial_angle_deg: u8,
    /// Gripper angle for the "closed" selector (degrees)
    pub gripper_closed_deg: u8,
    /// Gripper angle for the "open" selector (degrees)
    pub gripper_open_deg: u8,

    // --- Timing ---
    /// Loop delay while following the potentiometers (ms)
    pub local_tick_ms: u32,
    /// Loop delay while following the command channel (ms)
    pub external_tick_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Button
            debounce_ms: 50,

            // Filter
            noise_threshold: 4,
            outlier_threshold_deg: 20,
            reject_log_every: 10,
            adc_max: 1023, // 10-bit pots

            // Servos
            initial_angle_deg: 90,
            gripper_closed_deg: 100,
            gripper_open_deg: 180,

            // Timing
            local_tick_ms: 50,    // 20 Hz
            external_tick_ms: 10, // 100 Hz
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    ///
    /// Invalid values are rejected, never clamped, so a bad blob in storage
    /// cannot silently produce an out-of-range servo command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_max == 0 {
            return Err(ConfigError::ValidationFailed("adc_max must be > 0"));
        }
        if self.noise_threshold >= self.adc_max {
            return Err(ConfigError::ValidationFailed(
                "noise_threshold must be < adc_max",
            ));
        }
        if self.outlier_threshold_deg > 180 {
            return Err(ConfigError::ValidationFailed(
                "outlier_threshold_deg must be 0–180",
            ));
        }
        if self.reject_log_every == 0 {
            return Err(ConfigError::ValidationFailed(
                "reject_log_every must be >= 1",
            ));
        }
        for (deg, msg) in [
            (self.initial_angle_deg, "initial_angle_deg must be 0–180"),
            (self.gripper_closed_deg, "gripper_closed_deg must be 0–180"),
            (self.gripper_open_deg, "gripper_open_deg must be 0–180"),
        ] {
            if deg > 180 {
                return Err(ConfigError::ValidationFailed(msg));
            }
        }
        if !(1..=1000).contains(&self.local_tick_ms) {
            return Err(ConfigError::ValidationFailed(
                "local_tick_ms must be 1–1000",
            ));
        }
        if !(1..=1000).contains(&self.external_tick_ms) {
            return Err(ConfigError::ValidationFailed(
                "external_tick_ms must be 1–1000",
            ));
        }
        if self.debounce_ms > 1000 {
            return Err(ConfigError::ValidationFailed("debounce_ms must be 0–1000"));
        }
        Ok(())
    }
}
