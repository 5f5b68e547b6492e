//! Single-slot mailbox shared between the receive ISR and the main loop.
//!
//! ```text
//! ┌──────────────┐  on_receive()   ┌──────────────────────┐  take()   ┌───────────┐
//! │ I²C receive  │───────────────▶ │ [u8; 4] + available  │─────────▶ │ main loop │
//! │ (preempts)   │   (producer)    │ (critical section)   │ (consumer)│ (tick)    │
//! └──────────────┘                 └──────────────────────┘           └───────────┘
//! ```
//!
//! There is exactly one slot. A receipt that lands before the main loop has
//! taken the previous frame overwrites it (last write wins); nothing is
//! queued. Both sides touch the bytes only inside `critical_section::with`,
//! and the consumer holds the section for the 4-byte copy and the flag clear
//! and nothing else.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use super::frame::{CommandFrame, FRAME_LEN};

pub struct CommandMailbox {
    frame: Mutex<Cell<[u8; FRAME_LEN]>>,
    available: AtomicBool,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(Cell::new([0; FRAME_LEN])),
            available: AtomicBool::new(false),
        }
    }

    /// Producer side. Safe to call from interrupt context (bounded, no blocking).
    ///
    /// Copies up to [`FRAME_LEN`] bytes from `bytes` into the slot and raises
    /// the availability flag. Bytes past the fourth are left unread in the
    /// iterator. A short receipt only overwrites the leading positions; the
    /// trailing ones keep whatever the previous frame left there. An empty
    /// receipt still raises the flag.
    ///
    /// Returns the number of bytes taken.
    pub fn on_receive<I>(&self, bytes: I) -> usize
    where
        I: IntoIterator<Item = u8>,
    {
        critical_section::with(|cs| {
            let cell = self.frame.borrow(cs);
            let mut buf = cell.get();
            let mut taken = 0;
            // `buf` drives the zip so a fifth byte is never pulled.
            for (slot, byte) in buf.iter_mut().zip(bytes) {
                *slot = byte;
                taken += 1;
            }
            cell.set(buf);
            self.available.store(true, Ordering::Release);
            taken
        })
    }

    /// Consumer side. Returns the pending frame and clears the flag, or
    /// `None` if nothing arrived since the last take.
    pub fn take(&self) -> Option<CommandFrame> {
        if !self.available.load(Ordering::Acquire) {
            return None;
        }
        let raw = critical_section::with(|cs| {
            let raw = self.frame.borrow(cs).get();
            self.available.store(false, Ordering::Release);
            raw
        });
        Some(CommandFrame::from_bytes(raw))
    }

    /// Whether a frame is waiting.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}
