//! The actuator's single controller state.
//!
//! Owned by the control loop and passed by `&mut` into each step.  Fields
//! are private; each writer goes through the one method that keeps its
//! invariant (alert consistent with `latest` + thresholds, thresholds
//! clamped, mode a valid table row).

use crate::message::StatusMessage;

use super::alert::{self, AlertKind};
use super::modes::DisplayMode;
use super::thresholds::{Adjustment, Bound, Step, ThresholdConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    latest: StatusMessage,
    has_message: bool,
    alert: bool,
    thresholds: ThresholdConfig,
    mode: DisplayMode,
    last_input_activity: u64,
}

impl ControllerState {
    pub fn new(thresholds: ThresholdConfig, now_ms: u64) -> Self {
        Self {
            latest: StatusMessage::default(),
            has_message: false,
            alert: false,
            thresholds,
            mode: DisplayMode::CurrentData,
            last_input_activity: now_ms,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn latest(&self) -> &StatusMessage {
        &self.latest
    }

    /// `false` until the first status message has been accepted.
    pub fn has_message(&self) -> bool {
        self.has_message
    }

    pub fn alert(&self) -> bool {
        self.alert
    }

    /// The dominant alert reason; `None` whenever [`Self::alert`] is false.
    pub fn alert_kind(&self) -> Option<AlertKind> {
        if self.has_message {
            alert::classify(&self.latest, &self.thresholds)
        } else {
            None
        }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn last_input_activity(&self) -> u64 {
        self.last_input_activity
    }

    // ── Writers ───────────────────────────────────────────────

    /// Replace the latest message and recompute the alert.
    pub fn store_message(&mut self, msg: StatusMessage) {
        self.latest = msg;
        self.has_message = true;
        self.reevaluate();
    }

    pub(crate) fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub(crate) fn touch(&mut self, now_ms: u64) {
        self.last_input_activity = now_ms;
    }

    pub(crate) fn adjust_threshold(&mut self, bound: Bound, step: Step) -> Adjustment {
        let adj = self.thresholds.adjust(bound, step);
        self.reevaluate();
        adj
    }

    fn reevaluate(&mut self) {
        self.alert = self.has_message && alert::evaluate(&self.latest, &self.thresholds);
    }
}
