//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ActuatorService / SensorService (domain)
//! ```
//!
//! Driven adapters (transport, display, indicator, joystick, sensors,
//! clock, event sinks) implement these traits.  The services consume them
//! via generics, so the domain core never touches hardware directly.

use crate::controller::InputSample;
use crate::display::Frame;
use crate::error::TransportError;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: domain ↔ pub/sub broker)
// ───────────────────────────────────────────────────────────────

/// Raw publish/subscribe session.  No retry logic lives here; see
/// [`LinkPort`] for the reconnecting wrapper the services use.
pub trait TransportPort {
    /// One connection attempt.
    fn connect(&mut self) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError>;

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError>;

    /// Service the session and hand every pending inbound message to
    /// `on_message`, synchronously, on the caller's thread.  Returns the
    /// number of messages delivered.
    fn poll(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> usize;
}

/// A transport session bound to one topic that reconnects on demand.
pub trait LinkPort {
    /// Block until connected and subscribed.  Returns immediately when the
    /// session is already up.
    fn ensure_connected(&mut self, sink: &mut impl EventSink);

    /// Deliver pending messages; see [`TransportPort::poll`].
    fn poll(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> usize;

    /// Publish to the link's topic.
    fn publish(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator-side ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// 4-digit segment display.  Only [`DisplayPort::set_glyphs_at`] is
/// required; the rest are built on it.
pub trait DisplayPort {
    /// Write raw segment bytes starting at position `start`.
    fn set_glyphs_at(&mut self, start: usize, glyphs: &[u8]);

    fn show_numeric(&mut self, value: i32, dot_mask: u8, leading_zeros: bool) {
        self.show_frame(&Frame::numeric(value, dot_mask, leading_zeros));
    }

    fn clear(&mut self) {
        self.show_frame(&Frame::blank());
    }

    fn show_frame(&mut self, frame: &Frame) {
        self.set_glyphs_at(0, &frame.segments());
    }
}

/// Two-state colour indicator.
pub trait IndicatorPort {
    /// Alert colour when `alert`, normal colour otherwise.
    fn set_indicator(&mut self, alert: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Joystick.  Axis values are raw 12-bit ADC counts.
pub trait InputPort {
    fn read_axis_raw(&mut self, axis: Axis) -> u16;

    /// `true` while the switch is pressed.
    fn read_button(&mut self) -> bool;

    fn sample(&mut self) -> InputSample {
        InputSample {
            x: self.read_axis_raw(Axis::X),
            y: self.read_axis_raw(Axis::Y),
            button: self.read_button(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor-side ports (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw sensor reads.  Failures are folded into sentinels by the adapter:
/// −127.0 °C for a missing probe, 1.0 g for a failed accelerometer read.
pub trait SensorPort {
    fn read_body_temperature_c(&mut self) -> f32;

    /// NTC divider tap, 0–4095.
    fn read_ntc_raw(&mut self) -> u16;

    /// Vertical acceleration in g.
    fn read_acceleration_z(&mut self) -> f32;
}

/// 16×2 character display.
pub trait LcdPort {
    fn show_lines(&mut self, top: &str, bottom: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock and event sink
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
