//! Hardware adapter: bridges `embedded-hal` peripherals to the domain ports.
//!
//! Owns the four servo PWM channels, the pot ADC reader, the mode button
//! input and the indicator LED, and exposes them through [`SensorPort`] and
//! [`ActuatorPort`]. Generic over the `embedded-hal` 1.0 traits so the same
//! adapter runs on ESP-IDF drivers on target and on fakes in tests.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::indicator::Indicator;
use crate::drivers::servo::{SERVO_COUNT, angle_to_duty};
use crate::error::{ActuatorError, SensorError};
use crate::sensors::AnalogRead;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, A, B, L> {
    servos: [S; SERVO_COUNT],
    pots: A,
    button: B,
    led: Indicator<L>,
}

impl<S, A, B, L> HardwareAdapter<S, A, B, L>
where
    S: SetDutyCycle,
    A: AnalogRead,
    B: InputPin,
    L: OutputPin,
{
    pub fn new(servos: [S; SERVO_COUNT], pots: A, button: B, led: L) -> Self {
        Self {
            servos,
            pots,
            button,
            led: Indicator::new(led),
        }
    }

    pub fn indicator_on(&self) -> bool {
        self.led.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, A, B, L> SensorPort for HardwareAdapter<S, A, B, L>
where
    S: SetDutyCycle,
    A: AnalogRead,
    B: InputPin,
    L: OutputPin,
{
    fn read_pot(&mut self, channel: usize) -> Result<u16, SensorError> {
        if channel >= SERVO_COUNT {
            return Err(SensorError::NoSuchChannel);
        }
        self.pots.read_channel(channel)
    }

    fn button_level(&mut self) -> Result<PinState, SensorError> {
        let high = self
            .button
            .is_high()
            .map_err(|_| SensorError::GpioReadFailed)?;
        Ok(PinState::from(high))
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, A, B, L> ActuatorPort for HardwareAdapter<S, A, B, L>
where
    S: SetDutyCycle,
    A: AnalogRead,
    B: InputPin,
    L: OutputPin,
{
    fn write_servo(&mut self, channel: usize, angle: u8) -> Result<(), ActuatorError> {
        let servo = self
            .servos
            .get_mut(channel)
            .ok_or(ActuatorError::NoSuchChannel)?;
        let duty = angle_to_duty(angle, servo.max_duty_cycle());
        servo
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    fn set_indicator(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.led.set(on)
    }
}
