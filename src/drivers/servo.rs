//! Servo bank (four hobby servos on LEDC PWM).
//!
//! Holds the last commanded angle per channel and forwards every write to
//! the [`ActuatorPort`]. Callers are responsible for range discipline: the
//! filter maps into 0–180, the command path clamps, and the gripper only
//! ever receives configured angles.
//!
//! Standard servos take a 50 Hz frame with a 0.5–2.5 ms pulse for 0–180°;
//! [`angle_to_duty`] does that conversion for PWM-backed adapters.

use crate::app::ports::ActuatorPort;
use crate::error::ActuatorError;

/// Number of servo channels.
pub const SERVO_COUNT: usize = 4;
/// Channel index of the two-position gripper.
pub const GRIPPER: usize = 3;
/// Highest commandable angle.
pub const MAX_ANGLE: u8 = 180;

const FRAME_US: u32 = 20_000;
const MIN_PULSE_US: u32 = 500;
const MAX_PULSE_US: u32 = 2_500;

/// Convert a servo angle (0–180°) into a duty value out of `max_duty`.
pub fn angle_to_duty(angle: u8, max_duty: u16) -> u16 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    let pulse_us = MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE);
    (u32::from(max_duty) * pulse_us / FRAME_US) as u16
}

pub struct ServoBank {
    positions: [u8; SERVO_COUNT],
}

impl ServoBank {
    pub fn new(initial_angle: u8) -> Self {
        Self {
            positions: [initial_angle.min(MAX_ANGLE); SERVO_COUNT],
        }
    }

    /// Command `channel` to `angle` and record it as the current position.
    ///
    /// The position is recorded even if the hardware write fails, so the
    /// filter keeps comparing against the commanded target.
    pub fn write(
        &mut self,
        hw: &mut impl ActuatorPort,
        channel: usize,
        angle: u8,
    ) -> Result<(), ActuatorError> {
        debug_assert!(angle <= MAX_ANGLE, "servo angle {angle} out of range");
        let angle = angle.min(MAX_ANGLE);
        let slot = self
            .positions
            .get_mut(channel)
            .ok_or(ActuatorError::NoSuchChannel)?;
        *slot = angle;
        hw.write_servo(channel, angle)
    }

    /// Push every recorded position to the hardware (startup centering).
    pub fn write_all(&mut self, hw: &mut impl ActuatorPort) -> Result<(), ActuatorError> {
        let mut result = Ok(());
        for (ch, &angle) in self.positions.iter().enumerate() {
            if let Err(e) = hw.write_servo(ch, angle) {
                result = Err(e);
            }
        }
        result
    }

    pub fn position(&self, channel: usize) -> u8 {
        self.positions[channel]
    }

    pub fn positions(&self) -> [u8; SERVO_COUNT] {
        self.positions
    }
}
