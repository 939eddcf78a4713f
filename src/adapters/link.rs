//! Reconnecting session on one topic.
//!
//! [`Link`] wraps any [`TransportPort`] and implements [`LinkPort`] for
//! the services.  Reconnection retries forever with a fixed backoff and
//! the caller blocks until the session is back.
//!
//! ```text
//!   ensure_connected
//!        │ up? ──yes──▶ return
//!        ▼
//!   ┌─▶ connect ─▶ subscribe (subscriber role) ──ok──▶ LinkUp
//!   │      │ err
//!   │      ▼
//!   └── ConnectFailed ── delay(backoff)
//! ```

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, LinkPort, TransportPort};
use crate::config::SystemConfig;
use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Publisher,
    Subscriber,
}

pub struct Link<T, D> {
    transport: T,
    delay: D,
    topic: String,
    role: Role,
    backoff_ms: u32,
    /// Set once connect (and subscribe, if needed) succeeded.
    up: bool,
}

impl<T: TransportPort, D: DelayNs> Link<T, D> {
    /// A link that subscribes to `topic` after every connect.
    pub fn subscriber(transport: T, delay: D, topic: &str, backoff_ms: u32) -> Self {
        Self::with_role(transport, delay, topic, backoff_ms, Role::Subscriber)
    }

    /// A link that only publishes to `topic`.
    pub fn publisher(transport: T, delay: D, topic: &str, backoff_ms: u32) -> Self {
        Self::with_role(transport, delay, topic, backoff_ms, Role::Publisher)
    }

    pub fn subscriber_from_config(transport: T, delay: D, cfg: &SystemConfig) -> Self {
        Self::subscriber(transport, delay, &cfg.topic, cfg.reconnect_backoff_ms)
    }

    pub fn publisher_from_config(transport: T, delay: D, cfg: &SystemConfig) -> Self {
        Self::publisher(transport, delay, &cfg.topic, cfg.reconnect_backoff_ms)
    }

    fn with_role(transport: T, delay: D, topic: &str, backoff_ms: u32, role: Role) -> Self {
        Self {
            transport,
            delay,
            topic: topic.into(),
            role,
            backoff_ms,
            up: false,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_up(&self) -> bool {
        self.up && self.transport.is_connected()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn try_establish(&mut self) -> Result<(), TransportError> {
        if !self.transport.is_connected() {
            self.transport.connect()?;
        }
        if self.role == Role::Subscriber {
            self.transport.subscribe(&self.topic)?;
        }
        Ok(())
    }
}

impl<T: TransportPort, D: DelayNs> LinkPort for Link<T, D> {
    fn ensure_connected(&mut self, sink: &mut impl EventSink) {
        if self.is_up() {
            return;
        }
        if self.up {
            self.up = false;
            sink.emit(&AppEvent::LinkDown);
        }

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match self.try_establish() {
                Ok(()) => {
                    self.up = true;
                    debug!("link: '{}' established", self.topic);
                    sink.emit(&AppEvent::LinkUp { attempts: attempt });
                    return;
                }
                Err(error) => {
                    sink.emit(&AppEvent::ConnectFailed { attempt, error });
                    self.delay.delay_ms(self.backoff_ms);
                }
            }
        }
    }

    fn poll(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> usize {
        self.transport.poll(on_message)
    }

    fn publish(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if !self.is_up() {
            return Err(TransportError::NotConnected);
        }
        self.transport.publish(&self.topic, payload)
    }
}
