//! Application core: pure domain logic, zero I/O.
//!
//! The mode machine, pot filtering and command-frame application live
//! behind the [`service::ArmController`]. All interaction with hardware
//! happens through the **port traits** in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
