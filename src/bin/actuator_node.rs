//! VitaLink actuator node entry point.
//!
//! Subscribes to the shared status topic, evaluates alerts, and drives the
//! tri-colour indicator and the TM1637 display.  The joystick cycles the
//! display modes and edits the alert thresholds.
//!
//! ```text
//!  WiFi ─▶ MQTT (subscribe) ─▶ Link ─▶ ActuatorService ─▶ ActuatorBoard
//!                                          ▲                 │
//!                                          └── joystick ◀────┘
//! ```

use anyhow::Result;
use log::info;

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use vitalink::adapters::hardware::ActuatorBoard;
use vitalink::adapters::link::Link;
use vitalink::adapters::log_sink::LogEventSink;
use vitalink::adapters::mqtt::MqttTransport;
use vitalink::adapters::time::Esp32TimeAdapter;
use vitalink::adapters::wifi::{WifiAdapter, WifiCredentials};
use vitalink::app::ports::{ClockPort, DisplayPort};
use vitalink::app::ActuatorService;
use vitalink::config::SystemConfig;
use vitalink::drivers::indicator::Indicator;
use vitalink::drivers::joystick::Joystick;
use vitalink::drivers::tm1637::Tm1637;
use vitalink::drivers::hw_init;
use vitalink::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("VitaLink actuator node v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::load();

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_actuator_peripherals()?;
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take().ok();

    // TM1637 on GPIO27 (CLK) / GPIO26 (DIO).
    let display = Tm1637::new(
        PinDriver::output(peripherals.pins.gpio27)?,
        PinDriver::output(peripherals.pins.gpio26)?,
        Ets,
        pins::TM1637_BRIGHTNESS,
    )?;
    // Indicator R/G/B on GPIO13/12/14.
    let indicator = Indicator::new(
        PinDriver::output(peripherals.pins.gpio13)?,
        PinDriver::output(peripherals.pins.gpio12)?,
        PinDriver::output(peripherals.pins.gpio14)?,
    )?;
    let mut board = ActuatorBoard::new(display, indicator, Joystick::new());
    board.clear();

    // ── 3. Network ────────────────────────────────────────────
    let credentials = WifiCredentials::from_config(&config)?;
    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop, nvs, credentials, config.wifi_poll_ms)?;
    wifi.connect_blocking()?;

    let transport = MqttTransport::new(&config, &config.actuator_client_id);
    let mut link = Link::subscriber_from_config(transport, FreeRtos, &config);

    // ── 4. Control loop ───────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut service = ActuatorService::new(&config, clock.now_ms());
    service.start(&mut sink);

    loop {
        service.run_cycle(&mut link, &mut board, &clock, &mut sink);
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
