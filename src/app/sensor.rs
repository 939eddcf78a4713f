//! Sensor node service: sample, show, publish.
//!
//! ```text
//!  SensorPort ──raw──▶ ┌───────────────┐ ──▶ LcdPort
//!                      │ SensorService │ ──▶ LinkPort (publish)
//!                      └───────────────┘ ──▶ EventSink
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::display::lcd_lines;
use crate::message::StatusMessage;
use crate::sensors::is_free_fall;
use crate::sensors::ntc::{self, NtcParams};

use super::events::{AppEvent, NodeRole};
use super::ports::{ClockPort, EventSink, LcdPort, LinkPort, SensorPort};

pub struct SensorService {
    ntc: NtcParams,
    fall_threshold_g: f32,
    publish_interval_ms: u64,
    last_publish_ms: Option<u64>,
}

impl SensorService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ntc: NtcParams::from_config(config),
            fall_threshold_g: config.fall_accel_threshold_g,
            publish_interval_ms: u64::from(config.publish_interval_ms),
            last_publish_ms: None,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(NodeRole::Sensor));
        info!("SensorService started (publish every {} ms)", self.publish_interval_ms);
    }

    /// Read every sensor and fuse the readings into one message.
    pub fn sample(&self, hw: &mut impl SensorPort) -> StatusMessage {
        let body_temp = hw.read_body_temperature_c();
        let ntc_temp = ntc::celsius(hw.read_ntc_raw(), &self.ntc);
        let acc_z = hw.read_acceleration_z();
        StatusMessage {
            body_temp,
            ntc_temp,
            fall_detected: is_free_fall(acc_z, self.fall_threshold_g),
        }
    }

    /// `true` once per publish interval; always on the first call.
    fn publish_due(&self, now_ms: u64) -> bool {
        self.last_publish_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.publish_interval_ms)
    }

    /// One loop iteration.  Keeps the session alive every call; samples and
    /// publishes only when the interval has elapsed.  Returns the message
    /// when one was produced.
    pub fn run_cycle(
        &mut self,
        link: &mut impl LinkPort,
        hw: &mut (impl SensorPort + LcdPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Option<StatusMessage> {
        link.ensure_connected(sink);
        // Nothing is subscribed here; polling only services keep-alives.
        link.poll(&mut |_: &str, _: &[u8]| {});

        let now = clock.now_ms();
        if !self.publish_due(now) {
            return None;
        }
        self.last_publish_ms = Some(now);

        let msg = self.sample(hw);
        let lines = lcd_lines(&msg);
        hw.show_lines(&lines.top, &lines.bottom);

        match link.publish(msg.encode().as_bytes()) {
            Ok(()) => sink.emit(&AppEvent::Published(msg)),
            Err(e) => sink.emit(&AppEvent::PublishFailed(e)),
        }
        Some(msg)
    }
}
