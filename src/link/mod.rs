//! Inbound command link.
//!
//! The upstream controller writes fixed 4-byte [`CommandFrame`]s over I²C.
//! The transport's receive callback runs in interrupt context and hands the
//! bytes to [`command_receive_isr`], which stores them in the process-wide
//! [`COMMAND_MAILBOX`]. The main loop takes them out once per tick while in
//! command mode. [`receiver::receive_transaction`] turns the slave driver's
//! byte FIFO back into one receipt per bus transaction.
//!
//! Only one mailbox is wired to the transport, and only one controller may
//! consume from it. Tests build private [`CommandMailbox`] instances instead
//! of touching the global.

pub mod frame;
pub mod mailbox;
pub mod receiver;

pub use frame::{CommandFrame, FRAME_LEN, GripperSelect};
pub use mailbox::CommandMailbox;
pub use receiver::{RECEIPT_GAP_MS, receive_transaction};

/// The single dispatch entry the transport's receive callback feeds.
pub static COMMAND_MAILBOX: CommandMailbox = CommandMailbox::new();

/// Receive handler: register this as the transport's on-receive callback.
/// Bounded and lock-free apart from the 4-byte critical section.
pub fn command_receive_isr<I>(bytes: I) -> usize
where
    I: IntoIterator<Item = u8>,
{
    COMMAND_MAILBOX.on_receive(bytes)
}
