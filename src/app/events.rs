//! Outbound application events.
//!
//! The [`ArmController`](super::service::ArmController) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them; the stock one writes diagnostic lines
//! to the serial log.

use crate::fsm::Mode;
use crate::link::GripperSelect;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial mode and servo angles).
    Started { mode: Mode, angles: [u8; 4] },

    /// The mode button toggled the active input source.
    ModeChanged { from: Mode, to: Mode },

    /// The gripper was driven to a fixed angle on entering local mode.
    GripperForced { angle: u8 },

    /// A pot sample implied an implausible jump and was dropped.
    /// Emitted once per `reject_log_every` consecutive rejects.
    SampleRejected {
        channel: usize,
        candidate: u8,
        previous: u8,
        count: u16,
    },

    /// A command frame was taken from the mailbox (raw, pre-clamp values).
    CommandReceived {
        raw_targets: [u8; 3],
        raw_selector: u8,
        gripper: GripperSelect,
    },

    /// Per-tick angle report while following the pots.
    Angles([u8; 4]),
}
