//! Outbound application events.
//!
//! The services emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them.

use crate::controller::{AlertKind, Bound, DisplayMode};
use crate::error::{DecodeError, TransportError};
use crate::message::StatusMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Sensor,
    Actuator,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A service has started.
    Started(NodeRole),

    /// Connected and subscribed after `attempts` tries.
    LinkUp { attempts: u32 },
    /// The session was found down at the start of a cycle.
    LinkDown,
    /// One connection attempt failed; a backoff delay follows.
    ConnectFailed { attempt: u32, error: TransportError },

    /// A status message was accepted.
    MessageReceived(StatusMessage),
    /// A delivery on our topic could not be decoded.
    DecodeFailed(DecodeError),

    AlertRaised(AlertKind),
    AlertCleared,

    ModeChanged { from: DisplayMode, to: DisplayMode },
    /// The idle timeout sent the display back to `CurrentData`.
    ModeTimedOut { from: DisplayMode },
    ThresholdChanged { bound: Bound, value_c: f32, clamped: bool },

    Published(StatusMessage),
    PublishFailed(TransportError),

    /// Periodic actuator snapshot.
    Status(StatusReport),
}

/// A point-in-time view of the actuator, suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub mode: DisplayMode,
    pub alert: bool,
    pub body_temp: f32,
    pub ntc_temp: f32,
    pub fall_detected: bool,
    pub upper_c: f32,
    pub lower_c: f32,
}
