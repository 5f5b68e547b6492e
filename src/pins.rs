//! GPIO / peripheral pin assignments for the arm controller board.
//!
//! Single source of truth: every binding in `main` references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Servos (LEDC PWM, 50 Hz)
// ---------------------------------------------------------------------------

/// Base, shoulder, elbow, gripper, in channel order.
pub const SERVO_GPIOS: [i32; 4] = [9, 10, 11, 12];
/// Servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits). 14-bit gives ~11 steps per degree.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// Potentiometers (ADC1)
// ---------------------------------------------------------------------------

/// One pot per servo, in channel order.
pub const POT_ADC_GPIOS: [i32; 4] = [1, 2, 3, 4];

// ---------------------------------------------------------------------------
// Mode button / indicator
// ---------------------------------------------------------------------------

/// Momentary push-button, active-low with internal pull-up.
pub const BUTTON_GPIO: i32 = 5;
/// Mode LED: off = local pots, on = command channel.
pub const LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// I²C command link (slave)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// Address the upstream controller writes frames to.
pub const I2C_SLAVE_ADDR: u8 = 0x08;
