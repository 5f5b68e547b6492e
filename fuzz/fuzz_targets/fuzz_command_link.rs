//! Fuzz target: `CommandMailbox::on_receive` / `take`
//!
//! Splits the input into receipts of arbitrary length (first byte of each
//! chunk is its length) and checks that the mailbox never takes more than a
//! frame, always hands back the latest bytes, and never yields a target
//! outside 0–180°.
//!
//! cargo fuzz run fuzz_command_link

#![no_main]

use armctl::link::{CommandMailbox, FRAME_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mb = CommandMailbox::new();
    let mut expected = [0u8; FRAME_LEN];
    let mut rest = data;

    while let Some((&len, tail)) = rest.split_first() {
        let n = usize::from(len % 8).min(tail.len());
        let (chunk, next) = tail.split_at(n);
        rest = next;

        let taken = mb.on_receive(chunk.iter().copied());
        assert_eq!(taken, n.min(FRAME_LEN));
        expected[..taken].copy_from_slice(&chunk[..taken]);

        // Take on odd lengths only, so some receipts overwrite unread ones.
        if len % 2 == 1 {
            let frame = mb.take().expect("flag raised by on_receive");
            assert_eq!(frame.as_bytes(), &expected);
            assert!(frame.targets().iter().all(|&t| t <= 180));
            assert!(!mb.is_available());
        }
    }
});
