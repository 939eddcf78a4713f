//! Fuzz target: `Controller` message and input interleaving
//!
//! Arbitrary deliveries interleaved with joystick samples must keep the
//! threshold invariants and never panic while rendering.
//!
//! cargo fuzz run fuzz_controller_inbox

#![no_main]

use libfuzzer_sys::fuzz_target;
use vitalink::config::{SystemConfig, DEFAULT_TOPIC};
use vitalink::controller::{Controller, InputSample};

fuzz_target!(|data: &[u8]| {
    let mut c = Controller::new(&SystemConfig::default(), 0);
    let mut now = 0u64;
    for chunk in data.chunks(8) {
        let Some((&op, rest)) = chunk.split_first() else {
            continue;
        };
        now += u64::from(op) * 4;
        if op & 1 == 0 {
            c.on_message(DEFAULT_TOPIC, rest);
        } else {
            let y = rest.first().map_or(2047, |b| u16::from(*b) * 16);
            let sample = InputSample {
                x: 2047,
                y,
                button: op & 2 != 0,
            };
            c.poll_input(sample, now);
        }
        let t = c.state().thresholds();
        assert!(t.upper_deci() <= 420 && t.lower_deci() >= 300);
        assert!(t.upper_deci() - t.lower_deci() >= 5);
        let _ = c.frame();
    }
});
