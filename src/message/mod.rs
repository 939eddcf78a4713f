//! Status message exchanged between the sensor node and the actuator node.
//!
//! ```text
//! {"body_temp":36.5,"ntc_temp":24.8,"fall_detected":false}
//! ```
//!
//! The strict path parses JSON with serde.  Every key is optional on the
//! wire: a missing or `null` key takes its default (`body_temp` 0.0,
//! `ntc_temp` NaN, `fall_detected` false).  Older sensor nodes wrote a bare
//! `nan` for a saturated NTC, which is not JSON; [`decode_payload`] can
//! fall back to the key scanner in [`legacy`] for those.

pub mod legacy;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub use legacy::decode_legacy;

/// Largest encoded payload either node produces or accepts.
pub const MAX_PAYLOAD_LEN: usize = 256;

/// One sample from the sensor node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusMessage {
    /// Body temperature in °C.  −127.0 means the probe did not answer.
    pub body_temp: f32,
    /// Ambient (NTC) temperature in °C, NaN when the ADC saturated.
    pub ntc_temp: f32,
    pub fall_detected: bool,
}

impl Default for StatusMessage {
    /// The "nothing received yet" value.
    fn default() -> Self {
        Self {
            body_temp: 0.0,
            ntc_temp: f32::NAN,
            fall_detected: false,
        }
    }
}

impl StatusMessage {
    pub fn new(body_temp: f32, ntc_temp: f32, fall_detected: bool) -> Self {
        Self {
            body_temp,
            ntc_temp,
            fall_detected,
        }
    }

    /// Compact JSON encoding.  Non-finite temperatures become `null`.
    pub fn encode(&self) -> String {
        let wire = WireStatus {
            body_temp: finite(self.body_temp),
            ntc_temp: finite(self.ntc_temp),
            fall_detected: Some(self.fall_detected),
        };
        // Serialising a struct of plain scalars cannot fail.
        serde_json::to_string(&wire).unwrap_or_default()
    }
}

/// Field layout on the wire.  `Option` lets `null` and absent keys through.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WireStatus {
    #[serde(default)]
    body_temp: Option<f32>,
    #[serde(default)]
    ntc_temp: Option<f32>,
    #[serde(default)]
    fall_detected: Option<bool>,
}

impl From<WireStatus> for StatusMessage {
    fn from(w: WireStatus) -> Self {
        Self {
            body_temp: w.body_temp.unwrap_or(0.0),
            ntc_temp: w.ntc_temp.unwrap_or(f32::NAN),
            fall_detected: w.fall_detected.unwrap_or(false),
        }
    }
}

fn finite(v: f32) -> Option<f32> {
    v.is_finite().then_some(v)
}

/// Strict JSON decode.
pub fn decode(text: &str) -> Result<StatusMessage, DecodeError> {
    serde_json::from_str::<WireStatus>(text)
        .map(StatusMessage::from)
        .map_err(|_| DecodeError::Malformed)
}

/// Decode raw transport bytes, optionally falling back to the key scanner
/// when the strict parse fails.
pub fn decode_payload(bytes: &[u8], legacy_fallback: bool) -> Result<StatusMessage, DecodeError> {
    let text = core::str::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
    match decode(text) {
        Ok(msg) => Ok(msg),
        Err(_) if legacy_fallback => Ok(decode_legacy(text)),
        Err(e) => Err(e),
    }
}
