//! Fuzz target: status payload decoding
//!
//! Feeds arbitrary bytes through the strict decoder, the decoder with the
//! key-scan fallback, and the key scanner alone.  None may panic, and any
//! UTF-8 input must decode once the fallback is enabled.
//!
//! cargo fuzz run fuzz_status_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use vitalink::message::{decode_legacy, decode_payload};

fuzz_target!(|data: &[u8]| {
    let strict = decode_payload(data, false);
    let lenient = decode_payload(data, true);

    // The fallback only ever turns a strict failure into a message.
    if let Ok(msg) = strict {
        assert_eq!(lenient.ok().map(|m| m.fall_detected), Some(msg.fall_detected));
    }
    if let Ok(text) = core::str::from_utf8(data) {
        assert!(lenient.is_ok());
        let _ = decode_legacy(text);
    }
});
