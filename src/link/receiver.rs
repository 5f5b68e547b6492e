//! Bus-side framing: one transaction in, one receipt out.
//!
//! The I²C slave driver exposes a byte FIFO with no transaction boundaries,
//! and its read call returns once the buffer is full or the timeout expires.
//! A receipt therefore ends either when four bytes are in or when the bus
//! has been quiet for [`RECEIPT_GAP_MS`]. A short transaction is forwarded
//! with whatever arrived, so later frames never shift. Bytes already queued
//! past the fourth belong to the same over-length transaction and are
//! dropped before the next read.
//!
//! `read(buf, timeout_ms)` is the driver's blocking read with the timeout
//! in milliseconds.

use super::frame::FRAME_LEN;
use super::mailbox::CommandMailbox;

/// Bus silence that closes a partial transaction.
pub const RECEIPT_GAP_MS: u32 = 10;

const DRAIN_CHUNK: usize = 16;

/// Wait for one transaction and hand it to `mailbox`.
///
/// Returns the number of bytes stored, `0` if the bus stayed idle (the
/// mailbox is not touched then).
pub fn receive_transaction<R, E>(mailbox: &CommandMailbox, mut read: R) -> Result<usize, E>
where
    R: FnMut(&mut [u8], u32) -> Result<usize, E>,
{
    let mut buf = [0u8; FRAME_LEN];
    let n = read(&mut buf, RECEIPT_GAP_MS)?;
    if n == 0 {
        return Ok(0);
    }

    if n == FRAME_LEN {
        let mut scratch = [0u8; DRAIN_CHUNK];
        while read(&mut scratch, 0)? > 0 {}
    }

    Ok(mailbox.on_receive(buf[..n].iter().copied()))
}
