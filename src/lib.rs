//! VitaLink firmware library.
//!
//! Body-temperature and fall telemetry for two ESP32 nodes: a sensor node
//! publishes readings, an actuator node evaluates alerts and runs the
//! display/threshold controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │  MqttTransport / Loopback   Link   LogEventSink   Esp32Time  │
//! │  ActuatorBoard (TM1637, LED, joystick)  SensorBoard (LCD…)   │
//! │  ─────────────────── Port Trait Boundary ─────────────────── │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  ActuatorService ── Controller (modes, thresholds,     │  │
//! │  │                     alert, input machine, renderer)    │  │
//! │  │  SensorService   ── sensor fusion, message codec       │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, so the whole library builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod controller;
pub mod display;
pub mod drivers;
pub mod error;
pub mod message;
pub mod pins;
pub mod sensors;
