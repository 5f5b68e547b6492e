//! Actuator drivers, the debounced mode button and task spawning.

pub mod button;
pub mod indicator;
pub mod servo;
pub mod task_pin;
