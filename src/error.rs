//! Hardware error types for the arm controller firmware.
//!
//! One enum per port direction. All variants are `Copy` so they pass through
//! the control loop without allocation. None of them is fatal: the
//! controller logs and carries on.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC conversion failed or timed out.
    AdcReadFailed,
    /// GPIO read returned an error.
    GpioReadFailed,
    /// Channel index outside 0..=3.
    NoSuchChannel,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::NoSuchChannel => write!(f, "no such channel"),
        }
    }
}

impl core::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
    /// Channel index outside 0..=3.
    NoSuchChannel,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::NoSuchChannel => write!(f, "no such channel"),
        }
    }
}

impl core::error::Error for ActuatorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(ActuatorError::PwmWriteFailed.to_string(), "PWM write failed");
        assert_eq!(SensorError::AdcReadFailed.to_string(), "ADC read failed");
        assert_eq!(SensorError::NoSuchChannel.to_string(), "no such channel");
    }

    #[test]
    fn errors_box_into_anyhow() {
        let e = anyhow::Error::from(ActuatorError::GpioWriteFailed);
        assert_eq!(e.to_string(), "GPIO write failed");
        assert_eq!(
            e.downcast_ref::<ActuatorError>(),
            Some(&ActuatorError::GpioWriteFailed)
        );
    }
}
