//! Sensor subsystem: potentiometer filtering and the ADC read seam.
//!
//! `embedded-hal` 1.0 has no ADC trait, so platform code implements
//! [`AnalogRead`] over whatever oneshot driver it has and hands that to the
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter).

pub mod potentiometer;

use crate::error::SensorError;

/// Blocking single-sample read of one of the four pot channels.
pub trait AnalogRead {
    fn read_channel(&mut self, channel: usize) -> Result<u16, SensorError>;
}

impl<F> AnalogRead for F
where
    F: FnMut(usize) -> Result<u16, SensorError>,
{
    fn read_channel(&mut self, channel: usize) -> Result<u16, SensorError> {
        self(channel)
    }
}
