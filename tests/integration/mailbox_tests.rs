//! Concurrency tests for the command mailbox.
//!
//! A writer thread stands in for the I²C receive task and hammers the slot
//! while the test thread plays the control loop. Every frame written is four
//! copies of one byte, so any mix of two writes shows up as unequal bytes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use armctl::link::CommandMailbox;

const ROUNDS: usize = 2_000;

fn assert_whole(bytes: &[u8; 4]) {
    assert!(
        bytes.iter().all(|&b| b == bytes[0]),
        "torn frame {:?}",
        bytes
    );
}

#[test]
fn concurrent_receipts_never_tear() {
    let mb = CommandMailbox::new();
    let done = AtomicBool::new(false);
    let mut seen = 0usize;

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ROUNDS {
                for k in 0..=u8::MAX {
                    assert_eq!(mb.on_receive([k; 4]), 4);
                }
            }
            done.store(true, Ordering::Release);
        });

        while !done.load(Ordering::Acquire) {
            if let Some(frame) = mb.take() {
                assert_whole(frame.as_bytes());
                seen += 1;
            }
        }
    });

    match mb.take() {
        Some(frame) => assert_eq!(frame.as_bytes(), &[u8::MAX; 4]),
        None => assert!(seen > 0, "writer finished but nothing was ever taken"),
    }
    assert!(!mb.is_available());
}

#[test]
fn single_pass_is_seen_in_order() {
    let mb = CommandMailbox::new();
    let done = AtomicBool::new(false);
    let mut last = None;

    thread::scope(|s| {
        s.spawn(|| {
            for k in 0..=u8::MAX {
                mb.on_receive([k; 4]);
                thread::yield_now();
            }
            done.store(true, Ordering::Release);
        });

        loop {
            let finished = done.load(Ordering::Acquire);
            if let Some(frame) = mb.take() {
                let bytes = frame.as_bytes();
                assert_whole(bytes);
                if let Some(prev) = last {
                    assert!(bytes[0] > prev, "{} taken after {}", bytes[0], prev);
                }
                last = Some(bytes[0]);
            }
            if finished {
                break;
            }
        }
    });

    assert_eq!(last, Some(u8::MAX), "final write must be the one left behind");
}
