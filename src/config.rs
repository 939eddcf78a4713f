//! System configuration parameters
//!
//! All tunable parameters for both VitaLink nodes.  Network strings are
//! baked in from compile-time environment variables so credentials never
//! live in source; everything else has a fixed default.  Nothing here is
//! persisted: the operator-adjusted thresholds reset on every boot.

use core::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Default channel shared by both nodes.
pub const DEFAULT_TOPIC: &str = "esp32/health";

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Transport ---
    /// Broker URL, e.g. `mqtts://host:8883`.
    pub broker_url: String,
    pub broker_user: String,
    pub broker_password: String,
    /// Topic the sensor node publishes to and the actuator subscribes to.
    pub topic: String,
    pub sensor_client_id: String,
    pub actuator_client_id: String,
    /// Fixed delay between failed connection attempts (milliseconds).
    pub reconnect_backoff_ms: u32,
    /// How long one connection attempt waits for the broker handshake.
    pub connect_wait_ms: u32,

    // --- WiFi ---
    pub wifi_ssid: String,
    pub wifi_password: String,
    /// Station-association poll period while connecting (milliseconds).
    pub wifi_poll_ms: u32,

    // --- Sensor node ---
    /// Status publish period (milliseconds).
    pub publish_interval_ms: u32,
    /// |acc_z| below this (in g) is reported as a fall.
    pub fall_accel_threshold_g: f32,
    /// NTC Beta coefficient.
    pub ntc_beta: f32,
    /// Fixed divider resistor (ohms).
    pub ntc_series_ohms: f32,
    /// NTC resistance at 25 °C (ohms).
    pub ntc_nominal_ohms: f32,

    // --- Actuator node ---
    /// Control loop period (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Minimum time between two input-driven mutations (milliseconds).
    pub input_cooldown_ms: u32,
    /// Idle time after which an edit/report mode reverts (milliseconds).
    pub mode_timeout_ms: u32,
    /// Joystick axis rest value (raw ADC counts, 0–4095 scale).
    pub axis_center: u16,
    /// Half-width of the ignored band around `axis_center`.
    pub axis_deadzone: u16,
    /// Threshold increment per accepted deflection (°C).
    pub threshold_step_c: f32,
    pub default_upper_c: f32,
    pub default_lower_c: f32,
    /// Hard ceiling for the upper threshold (°C).
    pub upper_max_c: f32,
    /// Hard floor for the lower threshold (°C).
    pub lower_min_c: f32,
    /// Minimum separation between upper and lower thresholds (°C).
    pub min_gap_c: f32,
    /// Period of the structured status report (milliseconds).
    pub status_log_interval_ms: u32,
    /// Accept payloads from older sensor nodes that are not valid JSON.
    pub legacy_payload_fallback: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Transport
            broker_url: option_env!("VITALINK_BROKER_URL")
                .unwrap_or("mqtts://localhost:8883")
                .into(),
            broker_user: option_env!("VITALINK_BROKER_USER").unwrap_or("").into(),
            broker_password: option_env!("VITALINK_BROKER_PASSWORD").unwrap_or("").into(),
            topic: DEFAULT_TOPIC.into(),
            sensor_client_id: "ESP32Client".into(),
            actuator_client_id: "ESP32_SubscriberClient".into(),
            reconnect_backoff_ms: 5000,
            connect_wait_ms: 10_000,

            // WiFi
            wifi_ssid: option_env!("VITALINK_WIFI_SSID").unwrap_or("Wokwi-GUEST").into(),
            wifi_password: option_env!("VITALINK_WIFI_PASSWORD").unwrap_or("").into(),
            wifi_poll_ms: 500,

            // Sensor node
            publish_interval_ms: 2000,
            fall_accel_threshold_g: 0.2,
            ntc_beta: 3950.0,
            ntc_series_ohms: 10_000.0,
            ntc_nominal_ohms: 10_000.0,

            // Actuator node
            control_loop_interval_ms: 100, // 10 Hz
            input_cooldown_ms: 200,
            mode_timeout_ms: 5000,
            axis_center: 4095 / 2,
            axis_deadzone: 500,
            threshold_step_c: 0.1,
            default_upper_c: 38.0,
            default_lower_c: 36.0,
            upper_max_c: 42.0,
            lower_min_c: 30.0,
            min_gap_c: 0.5,
            status_log_interval_ms: 1000,
            legacy_payload_fallback: true,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON object holding any subset of the fields; the rest keep
    /// their defaults.  The result is validated.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|_| ConfigError::ValidationFailed("override is not a valid config object"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Boot-time configuration: defaults, optionally overridden by the
    /// `VITALINK_CONFIG_JSON` build variable.  An invalid override is
    /// logged and ignored.
    pub fn load() -> Self {
        Self::resolve(option_env!("VITALINK_CONFIG_JSON"))
    }

    pub fn resolve(override_json: Option<&str>) -> Self {
        let Some(text) = override_json else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(cfg) => {
                info!("config: build-time override applied");
                cfg
            }
            Err(e) => {
                warn!("config: override rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Check internal consistency.  Callers fall back to
    /// [`SystemConfig::default`] when this fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.is_empty() || self.topic.contains(['+', '#']) {
            return Err(ConfigError::ValidationFailed("topic must be a concrete, non-empty name"));
        }
        if self.reconnect_backoff_ms == 0 {
            return Err(ConfigError::ValidationFailed("reconnect_backoff_ms must be > 0"));
        }
        if self.publish_interval_ms == 0 || self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop intervals must be > 0"));
        }
        if self.input_cooldown_ms >= self.mode_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "input_cooldown_ms must be shorter than mode_timeout_ms",
            ));
        }
        if u32::from(self.axis_deadzone) >= u32::from(self.axis_center) {
            return Err(ConfigError::ValidationFailed("axis_deadzone must be below axis_center"));
        }
        if !(self.threshold_step_c >= 0.1 && self.min_gap_c >= 0.1) {
            return Err(ConfigError::ValidationFailed("step and gap must be at least 0.1 °C"));
        }
        if !(self.lower_min_c + self.min_gap_c <= self.upper_max_c) {
            return Err(ConfigError::ValidationFailed("threshold limits leave no room for the gap"));
        }
        if !(self.default_lower_c >= self.lower_min_c
            && self.default_upper_c <= self.upper_max_c
            && self.default_upper_c - self.default_lower_c >= self.min_gap_c - 0.001)
        {
            return Err(ConfigError::ValidationFailed("default thresholds violate their limits"));
        }
        if !(self.fall_accel_threshold_g > 0.0) {
            return Err(ConfigError::ValidationFailed("fall_accel_threshold_g must be > 0"));
        }
        if !(self.ntc_beta > 0.0 && self.ntc_series_ohms > 0.0 && self.ntc_nominal_ohms > 0.0) {
            return Err(ConfigError::ValidationFailed("NTC parameters must be positive"));
        }
        Ok(())
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the text names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
