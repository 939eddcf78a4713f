//! WiFi station-mode bring-up.
//!
//! Credentials are validated up front on every target.  On ESP-IDF the
//! [`WifiAdapter`] associates with the access point and keeps retrying at
//! a fixed poll interval until the network interface is up; both nodes
//! need the network before the broker link can start.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real driver via `esp_idf_svc::wifi`.
//! - **all other targets**: validation only (host tests).

use core::fmt;

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

/// Validated station credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

impl WifiCredentials {
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        Ok(Self {
            ssid: heapless::String::try_from(ssid).map_err(|_| ConnectivityError::InvalidSsid)?,
            password: heapless::String::try_from(password)
                .map_err(|_| ConnectivityError::InvalidPassword)?,
        })
    }

    pub fn from_config(cfg: &SystemConfig) -> Result<Self, ConnectivityError> {
        Self::new(&cfg.wifi_ssid, &cfg.wifi_password)
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Open network (no passphrase).
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF station
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod station {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    use super::{ConnectivityError, WifiCredentials};

    pub struct WifiAdapter {
        wifi: BlockingWifi<EspWifi<'static>>,
        credentials: WifiCredentials,
        poll_ms: u32,
    }

    impl WifiAdapter {
        pub fn new(
            modem: Modem,
            sysloop: EspSystemEventLoop,
            nvs: Option<EspDefaultNvsPartition>,
            credentials: WifiCredentials,
            poll_ms: u32,
        ) -> Result<Self, ConnectivityError> {
            let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)
                .map_err(|_| ConnectivityError::ConnectionFailed)?;
            let wifi = BlockingWifi::wrap(esp_wifi, sysloop)
                .map_err(|_| ConnectivityError::ConnectionFailed)?;
            Ok(Self {
                wifi,
                credentials,
                poll_ms,
            })
        }

        /// Start the station and block until an IP is assigned.  Retries
        /// forever; only driver configuration errors are returned.
        pub fn connect_blocking(&mut self) -> Result<(), ConnectivityError> {
            let creds = &self.credentials;
            let config = Configuration::Client(ClientConfiguration {
                ssid: creds.ssid().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
                password: creds
                    .password()
                    .try_into()
                    .map_err(|_| ConnectivityError::InvalidPassword)?,
                auth_method: if creds.is_open() { AuthMethod::None } else { AuthMethod::WPA2Personal },
                ..Default::default()
            });
            self.wifi
                .set_configuration(&config)
                .map_err(|_| ConnectivityError::ConnectionFailed)?;
            self.wifi.start().map_err(|_| ConnectivityError::ConnectionFailed)?;

            info!("WiFi: connecting to '{}'", self.credentials.ssid());
            let mut attempt: u32 = 0;
            loop {
                attempt = attempt.saturating_add(1);
                match self.wifi.connect().and_then(|()| self.wifi.wait_netif_up()) {
                    Ok(()) => break,
                    Err(e) => {
                        warn!("WiFi: attempt {} failed: {}", attempt, e);
                        FreeRtos::delay_ms(self.poll_ms);
                    }
                }
            }

            if let Ok(ip) = self.wifi.wifi().sta_netif().get_ip_info() {
                info!("WiFi: connected, ip={}", ip.ip);
            }
            Ok(())
        }

        pub fn is_connected(&self) -> bool {
            self.wifi.is_connected().unwrap_or(false)
        }
    }
}

#[cfg(target_os = "espidf")]
pub use station::WifiAdapter;

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
