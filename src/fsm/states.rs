//! Concrete mode handlers and table builder.
//!
//! ```text
//!   LOCAL_ANALOG ──[button edge]──▶ EXTERNAL_COMMAND
//!        ▲                                 │
//!        └──────────[button edge]──────────┘
//!
//!   enter LOCAL_ANALOG:     gripper → closed, LED off
//!   enter EXTERNAL_COMMAND: LED on
//! ```

use super::context::ModeContext;
use super::{Mode, ModeDescriptor};
use log::info;

/// Build the static mode table. Called once at startup.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        // Index 0: LocalAnalog
        ModeDescriptor {
            id: Mode::LocalAnalog,
            name: "LocalAnalog",
            indicator_on: false,
            on_enter: Some(local_enter),
            tick_delay: |cfg| cfg.local_tick_ms,
        },
        // Index 1: ExternalCommand
        ModeDescriptor {
            id: Mode::ExternalCommand,
            name: "ExternalCommand",
            indicator_on: true,
            on_enter: None,
            tick_delay: |cfg| cfg.external_tick_ms,
        },
    ]
}

// The pots always take over with the gripper at the closed angle.
fn local_enter(ctx: &mut ModeContext) {
    ctx.outputs.force_gripper = Some(ctx.config.gripper_closed_deg);
    info!(
        "LOCAL: gripper set to {} on entering local mode",
        ctx.config.gripper_closed_deg
    );
}
