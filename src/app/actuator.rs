//! Actuator node service: drives the controller from the ports.
//!
//! ```text
//!  LinkPort ──messages──▶ ┌──────────────────┐ ──▶ IndicatorPort
//!                         │  ActuatorService │ ──▶ DisplayPort
//!  InputPort ──sample───▶ │    Controller    │ ──▶ EventSink
//!                         └──────────────────┘
//! ```
//!
//! One [`ActuatorService::run_cycle`] per control-loop tick.  The link is
//! brought up first and that call blocks while the broker is unreachable,
//! so no alert or display update ever happens on a dead link.

use log::info;

use crate::config::SystemConfig;
use crate::controller::{AlertKind, Controller, InputOutcome, MessageOutcome};
use crate::display::Frame;

use super::events::{AppEvent, NodeRole, StatusReport};
use super::ports::{ClockPort, DisplayPort, EventSink, IndicatorPort, InputPort, LinkPort};

pub struct ActuatorService {
    controller: Controller,
    /// Last frame pushed to the display; `None` forces the next write.
    shown: Option<Frame>,
    last_alert: Option<AlertKind>,
    status_interval_ms: u64,
    last_status_ms: u64,
}

impl ActuatorService {
    pub fn new(config: &SystemConfig, now_ms: u64) -> Self {
        Self {
            controller: Controller::new(config, now_ms),
            shown: None,
            last_alert: None,
            status_interval_ms: u64::from(config.status_log_interval_ms),
            last_status_ms: now_ms,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(NodeRole::Actuator));
        info!("ActuatorService started in {}", self.controller.mode().name());
    }

    /// Run one full control cycle: link → messages → input → indicator →
    /// display → periodic status.
    ///
    /// `hw` satisfies all three output/input ports at once, which avoids
    /// juggling several mutable borrows of the same board.
    pub fn run_cycle(
        &mut self,
        link: &mut impl LinkPort,
        hw: &mut (impl InputPort + IndicatorPort + DisplayPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Blocks until the session is up.
        link.ensure_connected(sink);

        // 2. Inbound messages, delivered synchronously.
        let controller = &mut self.controller;
        let last_alert = &mut self.last_alert;
        link.poll(&mut |topic: &str, payload: &[u8]| match controller.on_message(topic, payload) {
            MessageOutcome::Accepted(msg) => {
                sink.emit(&AppEvent::MessageReceived(msg));
                note_alert(controller, last_alert, &mut *sink);
            }
            MessageOutcome::Rejected(e) => sink.emit(&AppEvent::DecodeFailed(e)),
            MessageOutcome::Ignored => {}
        });

        // 3. Joystick.
        let now = clock.now_ms();
        let sample = hw.sample();
        match self.controller.poll_input(sample, now) {
            InputOutcome::Idle => {}
            InputOutcome::ModeAdvanced { from, to } => {
                sink.emit(&AppEvent::ModeChanged { from, to });
            }
            InputOutcome::ThresholdAdjusted {
                bound,
                value_c,
                clamped,
            } => {
                sink.emit(&AppEvent::ThresholdChanged {
                    bound,
                    value_c,
                    clamped,
                });
                note_alert(&self.controller, &mut self.last_alert, sink);
            }
            InputOutcome::TimedOut { from } => {
                sink.emit(&AppEvent::ModeTimedOut { from });
            }
        }

        // 4. Indicator follows the alert every cycle.
        hw.set_indicator(self.controller.alert());

        // 5. Display only on change.
        let frame = self.controller.frame();
        if self.shown != Some(frame) {
            hw.show_frame(&frame);
            self.shown = Some(frame);
        }

        // 6. Periodic status.
        if now.saturating_sub(self.last_status_ms) >= self.status_interval_ms {
            self.last_status_ms = now;
            sink.emit(&AppEvent::Status(self.report()));
        }
    }

    pub fn report(&self) -> StatusReport {
        let state = self.controller.state();
        let latest = state.latest();
        StatusReport {
            mode: state.mode(),
            alert: state.alert(),
            body_temp: latest.body_temp,
            ntc_temp: latest.ntc_temp,
            fall_detected: latest.fall_detected,
            upper_c: state.thresholds().upper(),
            lower_c: state.thresholds().lower(),
        }
    }
}

/// Emit `AlertRaised` / `AlertCleared` when the dominant reason changed.
fn note_alert(controller: &Controller, last: &mut Option<AlertKind>, sink: &mut impl EventSink) {
    let now = controller.state().alert_kind();
    if now == *last {
        return;
    }
    *last = now;
    match now {
        Some(kind) => sink.emit(&AppEvent::AlertRaised(kind)),
        None => sink.emit(&AppEvent::AlertCleared),
    }
}
