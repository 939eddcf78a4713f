//! MQTT transport on ESP-IDF.
//!
//! Wraps `esp_idf_svc::mqtt::client::EspMqttClient` (TLS via the built-in
//! certificate bundle) behind [`TransportPort`].  The client runs its own
//! task; its event callback only flips the connection flag and copies
//! deliveries into a static [`Inbox`], which the control loop drains in
//! [`TransportPort::poll`].
//!
//! ```text
//!  esp-mqtt task ──callback──▶ CONNECTED / INBOX ──poll()──▶ control loop
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{info, warn};

use crate::app::ports::TransportPort;
use crate::config::SystemConfig;
use crate::error::TransportError;
use crate::message::MAX_PAYLOAD_LEN;

use super::inbox::Inbox;

/// Deliveries buffered between two control-loop polls.
const INBOX_DEPTH: usize = 8;
/// Granularity of the connect wait.
const CONNECT_POLL_MS: u32 = 50;

static INBOX: Inbox<INBOX_DEPTH> = Inbox::new();
static CONNECTED: AtomicBool = AtomicBool::new(false);

pub struct MqttTransport {
    url: String,
    client_id: String,
    user: String,
    password: String,
    connect_wait_ms: u32,
    client: Option<EspMqttClient<'static>>,
}

impl MqttTransport {
    pub fn new(cfg: &SystemConfig, client_id: &str) -> Self {
        Self {
            url: cfg.broker_url.clone(),
            client_id: client_id.into(),
            user: cfg.broker_user.clone(),
            password: cfg.broker_password.clone(),
            connect_wait_ms: cfg.connect_wait_ms,
            client: None,
        }
    }

    /// Messages lost to a full inbox since boot.
    pub fn dropped(&self) -> u32 {
        INBOX.dropped()
    }

    fn start_client(&mut self) -> Result<(), TransportError> {
        let conf = MqttClientConfiguration {
            client_id: Some(&self.client_id),
            username: (!self.user.is_empty()).then_some(self.user.as_str()),
            password: (!self.password.is_empty()).then_some(self.password.as_str()),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let client = EspMqttClient::new_cb(&self.url, &conf, |event| match event.payload() {
            EventPayload::Connected(_) => CONNECTED.store(true, Ordering::Release),
            EventPayload::Disconnected => {
                CONNECTED.store(false, Ordering::Release);
                INBOX.clear();
            }
            EventPayload::Received { topic: Some(topic), data, .. } => {
                if !INBOX.offer(topic, data) {
                    warn!("MQTT: inbox full or payload oversize, dropped");
                }
            }
            _ => {}
        })
        .map_err(|e| {
            warn!("MQTT: client start failed: {}", e);
            TransportError::ConnectFailed
        })?;
        self.client = Some(client);
        Ok(())
    }
}

impl TransportPort for MqttTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.client.is_none() {
            info!("MQTT: connecting to {} as '{}'", self.url, self.client_id);
            self.start_client()?;
        }
        let mut waited = 0;
        while !CONNECTED.load(Ordering::Acquire) {
            if waited >= self.connect_wait_ms {
                // Tear the client down so it stops retrying on its own.
                self.client = None;
                return Err(TransportError::ConnectFailed);
            }
            FreeRtos::delay_ms(CONNECT_POLL_MS);
            waited += CONNECT_POLL_MS;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.client.is_some() && CONNECTED.load(Ordering::Acquire)
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        let client = self.client.as_mut().ok_or(TransportError::NotConnected)?;
        client
            .subscribe(topic, QoS::AtMostOnce)
            .map(|_| ())
            .map_err(|_| TransportError::SubscribeFailed)
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(TransportError::TooLarge);
        }
        let client = self.client.as_mut().ok_or(TransportError::NotConnected)?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map(|_| ())
            .map_err(|_| TransportError::PublishFailed)
    }

    fn poll(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> usize {
        let mut delivered = 0;
        while let Some(msg) = INBOX.take() {
            on_message(&msg.topic, &msg.payload);
            delivered += 1;
        }
        delivered
    }
}
