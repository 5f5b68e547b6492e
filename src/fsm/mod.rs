//! Function-pointer finite state machine for the input-source mode.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ModeTable                                                   │
//! │  ┌─────────────────┬───────────┬───────────┬──────────────┐  │
//! │  │ Mode            │ indicator │ on_enter  │ tick_delay   │  │
//! │  ├─────────────────┼───────────┼───────────┼──────────────┤  │
//! │  │ LocalAnalog     │ off       │ fn(ctx)   │ fn(cfg)->ms  │  │
//! │  │ ExternalCommand │ on        │ None      │ fn(cfg)->ms  │  │
//! │  └─────────────────┴───────────┴───────────┴──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine is Mealy-style: outputs are produced by the transition, not
//! by the steady state. Every button edge flips the mode unconditionally;
//! the engine then writes the new mode's indicator level into
//! [`ModeContext::outputs`] and runs its `on_enter`, which may add a forced
//! gripper angle. The service applies those outputs to the hardware.

pub mod context;
pub mod states;

use context::{ModeContext, ModeOutputs};
use log::info;

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Which source drives the servos.
/// Must stay in sync with the table built in [`states::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Follow the local potentiometers.
    LocalAnalog = 0,
    /// Follow frames from the command link.
    ExternalCommand = 1,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert an index back to `Mode`. Out-of-range indices fall back to
    /// `LocalAnalog`, the safe source.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::LocalAnalog,
            1 => Self::ExternalCommand,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::LocalAnalog
            }
        }
    }

    /// The mode a button press switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::LocalAnalog => Self::ExternalCommand,
            Self::ExternalCommand => Self::LocalAnalog,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Transition action, run once when a mode is entered.
pub type ModeActionFn = fn(&mut ModeContext);

/// Per-mode loop delay in milliseconds.
pub type TickDelayFn = fn(&SystemConfig) -> u32;

// ---------------------------------------------------------------------------
// Mode descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub id: Mode,
    pub name: &'static str,
    /// Indicator level while this mode is active.
    pub indicator_on: bool,
    pub on_enter: Option<ModeActionFn>,
    pub tick_delay: TickDelayFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct ModeMachine {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [ModeDescriptor; Mode::COUNT],
    current: usize,
    transitions: u32,
}

impl ModeMachine {
    pub fn new(table: [ModeDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Publish the starting mode's indicator level. Does not run
    /// `on_enter`: boot is not a transition.
    pub fn start(&mut self, ctx: &mut ModeContext) {
        let desc = &self.table[self.current];
        info!("Mode machine starting in {}", desc.name);
        ctx.outputs = ModeOutputs {
            indicator_on: desc.indicator_on,
            force_gripper: None,
        };
    }

    /// Flip to the other mode and run its transition outputs.
    /// Returns `(from, to)`.
    pub fn toggle(&mut self, ctx: &mut ModeContext) -> (Mode, Mode) {
        let from = self.current_mode();
        let to = from.toggled();
        self.transition(to, ctx);
        (from, to)
    }

    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// Loop delay for the active mode.
    pub fn tick_delay_ms(&self, config: &SystemConfig) -> u32 {
        (self.table[self.current].tick_delay)(config)
    }

    /// Number of mode changes since construction.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Mode, ctx: &mut ModeContext) {
        let next_idx = next as usize;
        info!(
            "Mode transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;
        self.transitions = self.transitions.wrapping_add(1);
        ctx.outputs = ModeOutputs {
            indicator_on: self.table[next_idx].indicator_on,
            force_gripper: None,
        };

        if let Some(enter) = self.table[next_idx].on_enter {
            enter(ctx);
        }
    }
}
