//! Key-scan decoder for payloads from older sensor nodes.
//!
//! Values are located by literal key and cut at a terminator:
//!
//! | key               | value ends at | parsed as                     |
//! |-------------------|---------------|-------------------------------|
//! | `"body_temp":`    | next `,`      | numeric prefix, else 0.0      |
//! | `"ntc_temp":`     | next `,`      | numeric prefix or `nan`       |
//! | `"fall_detected":`| next `}`      | exactly `true`, else false    |
//!
//! The scanner never fails.  A missing key or a missing terminator yields
//! the field default, the same as the strict decoder's missing-key rule.

use super::StatusMessage;

const BODY_KEY: &str = "\"body_temp\":";
const NTC_KEY: &str = "\"ntc_temp\":";
const FALL_KEY: &str = "\"fall_detected\":";

/// Scan `text` for the three status keys.
pub fn decode_legacy(text: &str) -> StatusMessage {
    let body_temp = field(text, BODY_KEY, ',').map_or(0.0, |v| parse_float_prefix(v).unwrap_or(0.0));
    let ntc_temp = field(text, NTC_KEY, ',').map_or(f32::NAN, |v| {
        parse_float_prefix(v).unwrap_or(f32::NAN)
    });
    let fall_detected = field(text, FALL_KEY, '}').is_some_and(|v| v == "true");

    StatusMessage {
        body_temp,
        ntc_temp,
        fall_detected,
    }
}

/// The raw text between `key` and the first `end` after it.
fn field<'a>(text: &'a str, key: &str, end: char) -> Option<&'a str> {
    let start = text.find(key)? + key.len();
    let rest = &text[start..];
    let stop = rest.find(end)?;
    Some(&rest[..stop])
}

/// Parse the longest leading `[ws][+-]digits[.digits]` run.  A leading
/// `nan` (any case) yields NaN.  `None` when no digit is present.
fn parse_float_prefix(s: &str) -> Option<f32> {
    let s = s.trim_start();
    if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("nan")) {
        return Some(f32::NAN);
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone trailing '.' is only accepted after integer digits.
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}
