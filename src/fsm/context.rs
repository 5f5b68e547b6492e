//! Context threaded through every mode transition handler.
//!
//! Handlers never touch hardware. They write [`ModeOutputs`], and the
//! [`ArmController`](crate::app::service::ArmController) applies those to the
//! actuator port right after the transition.

use crate::config::SystemConfig;

/// Outputs produced by the most recent transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeOutputs {
    /// Mode LED level.
    pub indicator_on: bool,
    /// Angle the gripper must be driven to, if the transition forces one.
    pub force_gripper: Option<u8>,
}

pub struct ModeContext {
    /// Thresholds and fixed angles.
    pub config: SystemConfig,
    pub outputs: ModeOutputs,
}

impl ModeContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            outputs: ModeOutputs::default(),
        }
    }
}
