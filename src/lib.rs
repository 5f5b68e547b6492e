//! armctl firmware library.
//!
//! Control core for a four-servo arm that follows either its local
//! potentiometers or 4-byte frames from an upstream controller, toggled by a
//! push button. Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]` within
//! each module.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`app`] | Controller service and the port traits it drives |
//! | [`fsm`] | Two-mode Mealy machine (local pots / command link) |
//! | [`sensors`] | Potentiometer dead-band + outlier filter |
//! | [`drivers`] | Servo bank, button debouncer, mode indicator |
//! | [`link`] | Command frame and the ISR-shared mailbox |
//! | [`adapters`] | Hardware, logging, clock and storage adapters |

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod link;
pub mod pins;
pub mod sensors;
