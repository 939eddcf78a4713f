//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  Each
//! line starts with a fixed tag so a serial capture can be grepped.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(role) => {
                info!("START | role={:?}", role);
            }
            AppEvent::LinkUp { attempts } => {
                info!("LINK  | up after {} attempt(s)", attempts);
            }
            AppEvent::LinkDown => {
                warn!("LINK  | down, reconnecting");
            }
            AppEvent::ConnectFailed { attempt, error } => {
                warn!("LINK  | attempt {} failed: {}", attempt, error);
            }
            AppEvent::MessageReceived(msg) => {
                info!(
                    "RX    | body={:.2}\u{00b0}C ntc={:.2}\u{00b0}C fall={}",
                    msg.body_temp, msg.ntc_temp, msg.fall_detected
                );
            }
            AppEvent::DecodeFailed(e) => {
                warn!("RX    | dropped payload: {}", e);
            }
            AppEvent::AlertRaised(kind) => {
                warn!("ALERT | {}", kind.label());
            }
            AppEvent::AlertCleared => {
                info!("ALERT | cleared");
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {} -> {}", from.name(), to.name());
            }
            AppEvent::ModeTimedOut { from } => {
                info!("MODE  | {} timed out -> CURRENT_DATA", from.name());
            }
            AppEvent::ThresholdChanged { bound, value_c, clamped } => {
                info!(
                    "THRSH | {:?} = {:.1}\u{00b0}C{}",
                    bound,
                    value_c,
                    if *clamped { " (clamped)" } else { "" }
                );
            }
            AppEvent::Published(msg) => {
                info!(
                    "PUB   | body={:.2}\u{00b0}C ntc={:.2}\u{00b0}C fall={}",
                    msg.body_temp, msg.ntc_temp, msg.fall_detected
                );
            }
            AppEvent::PublishFailed(e) => {
                warn!("PUB   | failed: {}", e);
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | mode={} | alert={} | body={:.1}\u{00b0}C ntc={:.1}\u{00b0}C | \
                     fall={} | upper={:.1} lower={:.1}",
                    s.mode.name(),
                    if s.alert { "YES" } else { "NO" },
                    s.body_temp,
                    s.ntc_temp,
                    if s.fall_detected { "YES" } else { "NO" },
                    s.upper_c,
                    s.lower_c,
                );
            }
        }
    }
}
