//! Alert evaluation.
//!
//! Pure functions of the latest status message and the thresholds.  The
//! controller re-runs them whenever either input changes.

use crate::message::StatusMessage;

use super::thresholds::ThresholdConfig;

/// Why the alert is raised, in reporting precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    HighBodyTemp,
    LowBodyTemp,
    FallDetected,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::HighBodyTemp => "high body temperature",
            Self::LowBodyTemp => "low body temperature",
            Self::FallDetected => "fall detected",
        }
    }
}

/// `true` when the body temperature is outside `[lower, upper]` or a fall
/// was reported.  A NaN temperature only alerts through the fall flag.
pub fn evaluate(msg: &StatusMessage, thresholds: &ThresholdConfig) -> bool {
    msg.body_temp > thresholds.upper() || msg.body_temp < thresholds.lower() || msg.fall_detected
}

/// The dominant reason behind [`evaluate`], if any.
pub fn classify(msg: &StatusMessage, thresholds: &ThresholdConfig) -> Option<AlertKind> {
    if msg.body_temp > thresholds.upper() {
        Some(AlertKind::HighBodyTemp)
    } else if msg.body_temp < thresholds.lower() {
        Some(AlertKind::LowBodyTemp)
    } else if msg.fall_detected {
        Some(AlertKind::FallDetected)
    } else {
        None
    }
}
