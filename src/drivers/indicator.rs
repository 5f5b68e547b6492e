//! Mode indicator LED.
//!
//! Off while following the pots, on while following the command link.
//! Any `embedded_hal` output pin works; polarity is active-high.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::ActuatorError;

pub struct Indicator<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Indicator<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pin
            .set_state(PinState::from(on))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
