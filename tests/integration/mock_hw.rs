//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers. Pot readings and the
//! button level are plain fields the test sets between ticks.

use armctl::app::events::AppEvent;
use armctl::app::ports::{ActuatorPort, EventSink, SensorPort};
use armctl::error::{ActuatorError, SensorError};
use embedded_hal::digital::PinState;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Servo { channel: usize, angle: u8 },
    Indicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub pots: [u16; 4],
    pub button: PinState,
    /// Channels whose pot read returns `AdcReadFailed`.
    pub failing_pots: [bool; 4],
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            pots: [0; 4],
            button: PinState::High,
            failing_pots: [false; 4],
            calls: Vec::new(),
        }
    }

    /// All servo writes in order, as `(channel, angle)`.
    pub fn servo_writes(&self) -> Vec<(usize, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                ActuatorCall::Servo { channel, angle } => Some((channel, angle)),
                ActuatorCall::Indicator(_) => None,
            })
            .collect()
    }

    /// Last angle written to `channel`, if any.
    pub fn last_angle(&self, channel: usize) -> Option<u8> {
        self.servo_writes()
            .into_iter()
            .rev()
            .find_map(|(ch, a)| (ch == channel).then_some(a))
    }

    pub fn indicator(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::Indicator(on) => Some(on),
            ActuatorCall::Servo { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_pot(&mut self, channel: usize) -> Result<u16, SensorError> {
        if *self.failing_pots.get(channel).ok_or(SensorError::NoSuchChannel)? {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(self.pots[channel])
    }

    fn button_level(&mut self) -> Result<PinState, SensorError> {
        Ok(self.button)
    }
}

impl ActuatorPort for MockHardware {
    fn write_servo(&mut self, channel: usize, angle: u8) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Servo { channel, angle });
        Ok(())
    }

    fn set_indicator(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Indicator(on));
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Collects every emitted event.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
