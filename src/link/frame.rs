//! Fixed 4-byte command frame.
//!
//! ```text
//! ┌────────┬────────┬────────┬──────────┐
//! │ byte 0 │ byte 1 │ byte 2 │  byte 3  │
//! │ ch0    │ ch1    │ ch2    │ gripper  │
//! │ 0–255  │ 0–255  │ 0–255  │ 0 / != 0 │
//! └────────┴────────┴────────┴──────────┘
//! ```
//!
//! Position bytes above 180 clamp to 180. Byte 3 only distinguishes zero
//! from nonzero. There is no header, length or checksum, so a stale or
//! truncated frame decodes like any other.

/// Bytes per frame on the wire.
pub const FRAME_LEN: usize = 4;

/// Number of continuously-positioned channels carried by a frame.
pub const TARGET_COUNT: usize = 3;

/// Two-position gripper selector carried in byte 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripperSelect {
    /// Selector byte is zero.
    Open,
    /// Selector byte is nonzero.
    Closed,
}

/// One decoded command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFrame {
    raw: [u8; FRAME_LEN],
}

impl CommandFrame {
    pub const fn from_bytes(raw: [u8; FRAME_LEN]) -> Self {
        Self { raw }
    }

    /// The bytes exactly as received.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.raw
    }

    /// Unclamped position bytes for channels 0–2.
    pub fn raw_targets(&self) -> [u8; TARGET_COUNT] {
        [self.raw[0], self.raw[1], self.raw[2]]
    }

    /// Position targets for channels 0–2, clamped to 0–180.
    pub fn targets(&self) -> [u8; TARGET_COUNT] {
        self.raw_targets().map(|b| b.min(180))
    }

    /// Raw selector byte.
    pub fn selector(&self) -> u8 {
        self.raw[3]
    }

    pub fn gripper(&self) -> GripperSelect {
        if self.raw[3] != 0 {
            GripperSelect::Closed
        } else {
            GripperSelect::Open
        }
    }
}
