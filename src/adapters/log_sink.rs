//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events as human-readable
//! lines to the `log` facade (UART / USB-CDC in production). The format is
//! for people watching a serial console, not for parsing.

use core::fmt::Write;

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::drivers::servo::SERVO_COUNT;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

/// `angles: 90° | 45° | 120° | 100°`
pub fn format_angles(angles: &[u8; SERVO_COUNT]) -> heapless::String<64> {
    let mut line = heapless::String::new();
    let _ = line.push_str("angles: ");
    for (i, a) in angles.iter().enumerate() {
        if i > 0 {
            let _ = line.push_str(" | ");
        }
        let _ = write!(line, "{}\u{00b0}", a);
    }
    line
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode, angles } => {
                info!("START | mode={:?} | {}", mode, format_angles(angles));
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::GripperForced { angle } => {
                info!("MODE  | gripper set to {}\u{00b0}", angle);
            }
            AppEvent::SampleRejected {
                channel,
                candidate,
                previous,
                count,
            } => {
                info!(
                    "POT   | dropped outlier on pot {}: {} (prev {}) x{}",
                    channel, candidate, previous, count
                );
            }
            AppEvent::CommandReceived {
                raw_targets,
                raw_selector,
                ..
            } => {
                info!(
                    "LINK  | received {},{},{} btn={}",
                    raw_targets[0], raw_targets[1], raw_targets[2], raw_selector
                );
            }
            AppEvent::Angles(angles) => {
                info!("{}", format_angles(angles));
            }
        }
    }
}
