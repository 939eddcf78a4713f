//! Display / alert controller for the actuator node.
//!
//! ```text
//!   transport ──on_message──▶ ┌─────────────────┐
//!                             │ ControllerState │ ──frame()──▶ Frame
//!   joystick ──poll_input───▶ └─────────────────┘
//! ```
//!
//! [`Controller`] bundles the state with the input machine and the message
//! decoder so the service layer drives everything through three calls.
//! Nothing here touches hardware, logs, or blocks.

pub mod alert;
pub mod input;
pub mod modes;
pub mod state;
pub mod thresholds;

pub use alert::AlertKind;
pub use input::{InputMachine, InputOutcome, InputSample};
pub use modes::DisplayMode;
pub use state::ControllerState;
pub use thresholds::{Bound, ThresholdConfig};

use crate::config::SystemConfig;
use crate::display::{self, Frame};
use crate::error::DecodeError;
use crate::message::{self, StatusMessage};

/// What [`Controller::on_message`] did with a delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageOutcome {
    /// Delivered on a topic this controller does not listen to.
    Ignored,
    /// Decoded and stored as the latest message.
    Accepted(StatusMessage),
    /// Could not be decoded; the previous latest message is kept.
    Rejected(DecodeError),
}

pub struct Controller {
    state: ControllerState,
    input: InputMachine,
    topic: String,
    legacy_fallback: bool,
}

impl Controller {
    pub fn new(cfg: &SystemConfig, now_ms: u64) -> Self {
        Self {
            state: ControllerState::new(ThresholdConfig::from_config(cfg), now_ms),
            input: InputMachine::from_config(cfg),
            topic: cfg.topic.clone(),
            legacy_fallback: cfg.legacy_payload_fallback,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn alert(&self) -> bool {
        self.state.alert()
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode()
    }

    /// Transport receive hook.  Runs on the control-loop thread.
    pub fn on_message(&mut self, topic: &str, payload: &[u8]) -> MessageOutcome {
        if topic != self.topic {
            return MessageOutcome::Ignored;
        }
        match message::decode_payload(payload, self.legacy_fallback) {
            Ok(msg) => {
                self.state.store_message(msg);
                MessageOutcome::Accepted(msg)
            }
            Err(e) => MessageOutcome::Rejected(e),
        }
    }

    pub fn poll_input(&mut self, sample: InputSample, now_ms: u64) -> InputOutcome {
        self.input.step(&mut self.state, sample, now_ms)
    }

    /// Render the current state.  Until the first message arrives the body
    /// temperature is unknown and the numeric view shows dashes.
    pub fn frame(&self) -> Frame {
        let latest = self.state.latest();
        let body = if self.state.has_message() {
            latest.body_temp
        } else {
            f32::NAN
        };
        display::render(
            self.state.mode(),
            self.state.alert(),
            latest.fall_detected,
            body,
            self.state.thresholds(),
        )
    }
}
