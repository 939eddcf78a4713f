//! Inbound message queue between the transport callback and the loop.
//!
//! The MQTT client delivers messages on its own task.  Rather than touch
//! controller state from there, the callback copies each delivery into a
//! bounded `embassy-sync` channel and the control loop drains it during
//! [`TransportPort::poll`](crate::app::ports::TransportPort::poll):
//!
//! ```text
//! ┌──────────────┐ InboundMessage ┌──────────────┐
//! │ MQTT task    │───────────────▶│ Control loop │
//! │ (callback)   │   try_send     │ (try_receive)│
//! └──────────────┘                └──────────────┘
//! ```
//!
//! A full queue drops the newest message and counts it.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::{String, Vec};

use crate::message::MAX_PAYLOAD_LEN;

/// Longest topic name accepted.
pub const MAX_TOPIC_LEN: usize = 64;

/// One delivery copied out of the transport's buffers.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub topic: String<MAX_TOPIC_LEN>,
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl InboundMessage {
    /// `None` when either part exceeds its capacity.
    pub fn new(topic: &str, payload: &[u8]) -> Option<Self> {
        Some(Self {
            topic: String::try_from(topic).ok()?,
            payload: Vec::from_slice(payload).ok()?,
        })
    }
}

pub struct Inbox<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, InboundMessage, N>,
    dropped: AtomicU32,
}

impl<const N: usize> Default for Inbox<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Inbox<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue a delivery.  Returns `false` (and counts a drop) when the
    /// message is oversized or the queue is full.
    pub fn offer(&self, topic: &str, payload: &[u8]) -> bool {
        let accepted = InboundMessage::new(topic, payload)
            .is_some_and(|msg| self.channel.try_send(msg).is_ok());
        if !accepted {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    pub fn take(&self) -> Option<InboundMessage> {
        self.channel.try_receive().ok()
    }

    /// Discard everything queued.
    pub fn clear(&self) {
        while self.take().is_some() {}
    }

    /// Messages lost since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
