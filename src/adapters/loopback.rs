//! In-memory pub/sub broker for host builds.
//!
//! Lets both node services run against each other in one process, with
//! injectable connection failures and session drops.  Delivery goes
//! through the same [`Inbox`] the ESP-IDF transport uses, so ordering and
//! overflow behave the same way.
//!
//! Dropping the sessions mirrors an MQTT clean-session disconnect: the
//! subscriptions and any undelivered messages are lost.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::ports::TransportPort;
use crate::error::TransportError;
use crate::message::MAX_PAYLOAD_LEN;

use super::inbox::Inbox;

/// Per-client queue depth.
pub const LOOPBACK_DEPTH: usize = 16;

type ClientInbox = Rc<Inbox<LOOPBACK_DEPTH>>;

struct Session {
    client_id: String,
    connected: bool,
    topics: Vec<String>,
    inbox: ClientInbox,
}

#[derive(Default)]
struct BrokerState {
    sessions: Vec<Session>,
    fail_connects: u32,
    connect_attempts: u32,
    published: Vec<(String, Vec<u8>)>,
}

/// Shared handle to the broker.  Cheap to clone.
#[derive(Clone, Default)]
pub struct LoopbackBroker {
    state: Rc<RefCell<BrokerState>>,
}

impl LoopbackBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client session (initially disconnected).
    pub fn client(&self, client_id: &str) -> LoopbackClient {
        let inbox: ClientInbox = Rc::new(Inbox::new());
        let mut st = self.state.borrow_mut();
        st.sessions.push(Session {
            client_id: client_id.into(),
            connected: false,
            topics: Vec::new(),
            inbox: inbox.clone(),
        });
        LoopbackClient {
            broker: self.state.clone(),
            slot: st.sessions.len() - 1,
            inbox,
        }
    }

    /// Refuse the next `n` connection attempts from any client.
    pub fn fail_next_connects(&self, n: u32) {
        self.state.borrow_mut().fail_connects = n;
    }

    /// Disconnect every session and forget subscriptions.
    pub fn drop_all(&self) {
        for s in &mut self.state.borrow_mut().sessions {
            s.connected = false;
            s.topics.clear();
            s.inbox.clear();
        }
    }

    pub fn connect_attempts(&self) -> u32 {
        self.state.borrow().connect_attempts
    }

    /// Every accepted publish, in order.
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.state.borrow().published.clone()
    }

    pub fn client_ids(&self) -> Vec<String> {
        self.state.borrow().sessions.iter().map(|s| s.client_id.clone()).collect()
    }

    /// Inject a message as if some other client had published it.
    pub fn inject(&self, topic: &str, payload: &[u8]) {
        deliver(&self.state.borrow(), topic, payload);
    }
}

fn deliver(st: &BrokerState, topic: &str, payload: &[u8]) {
    for s in &st.sessions {
        if s.connected && s.topics.iter().any(|t| t == topic) {
            s.inbox.offer(topic, payload);
        }
    }
}

pub struct LoopbackClient {
    broker: Rc<RefCell<BrokerState>>,
    slot: usize,
    inbox: ClientInbox,
}

impl LoopbackClient {
    /// Messages this client lost to a full queue.
    pub fn dropped(&self) -> u32 {
        self.inbox.dropped()
    }
}

impl TransportPort for LoopbackClient {
    fn connect(&mut self) -> Result<(), TransportError> {
        let mut st = self.broker.borrow_mut();
        st.connect_attempts += 1;
        if st.fail_connects > 0 {
            st.fail_connects -= 1;
            return Err(TransportError::ConnectFailed);
        }
        st.sessions[self.slot].connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.broker.borrow().sessions[self.slot].connected
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        let mut st = self.broker.borrow_mut();
        let session = &mut st.sessions[self.slot];
        if !session.connected {
            return Err(TransportError::NotConnected);
        }
        if !session.topics.iter().any(|t| t == topic) {
            session.topics.push(topic.into());
        }
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError> {
        let mut st = self.broker.borrow_mut();
        if !st.sessions[self.slot].connected {
            return Err(TransportError::NotConnected);
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(TransportError::TooLarge);
        }
        st.published.push((topic.into(), payload.to_vec()));
        deliver(&st, topic, payload);
        Ok(())
    }

    fn poll(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> usize {
        if !self.is_connected() {
            return 0;
        }
        let mut delivered = 0;
        while let Some(msg) = self.inbox.take() {
            on_message(&msg.topic, &msg.payload);
            delivered += 1;
        }
        delivered
    }
}
