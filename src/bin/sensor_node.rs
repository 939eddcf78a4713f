//! VitaLink sensor node entry point.
//!
//! Reads the DS18B20 body probe, the NTC ambient thermistor and the
//! MPU6050 accelerometer, shows the reading on the 16×2 LCD, and publishes
//! it to the shared status topic.
//!
//! ```text
//!  DS18B20 ─┐
//!  NTC ─────┼─▶ SensorBoard ─▶ SensorService ─▶ Link ─▶ MQTT (publish)
//!  MPU6050 ─┘        │
//!                    └─▶ LCD
//! ```

use anyhow::Result;
use log::info;

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use vitalink::adapters::hardware::SensorBoard;
use vitalink::adapters::link::Link;
use vitalink::adapters::log_sink::LogEventSink;
use vitalink::adapters::mqtt::MqttTransport;
use vitalink::adapters::time::Esp32TimeAdapter;
use vitalink::adapters::wifi::{WifiAdapter, WifiCredentials};
use vitalink::app::SensorService;
use vitalink::config::SystemConfig;
use vitalink::drivers::hw_init;
use vitalink::drivers::lcd1602::Lcd1602;
use vitalink::pins;
use vitalink::sensors::ds18b20::Ds18b20;
use vitalink::sensors::mpu6050::Mpu6050;
use vitalink::sensors::ntc::NtcSensor;
use vitalink::sensors::SensorHub;

/// Main-loop tick; publishing is paced by `publish_interval_ms`.
const LOOP_TICK_MS: u32 = 100;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("VitaLink sensor node v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::load();

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_sensor_peripherals()?;
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take().ok();

    // 1-Wire on GPIO4: open-drain so the pull-up owns the idle level.
    let one_wire = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    let probe = Ds18b20::new(one_wire, Ets);

    // Shared I²C bus on GPIO21 (SDA) / GPIO22 (SCL).
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;

    let hub = SensorHub::new(
        i2c,
        probe,
        NtcSensor::new(pins::NTC_ADC_CH),
        Mpu6050::new(pins::MPU6050_I2C_ADDR),
    );
    let mut board = SensorBoard::new(hub, Lcd1602::new(pins::LCD_I2C_ADDR), &mut FreeRtos);

    // ── 3. Network ────────────────────────────────────────────
    let credentials = WifiCredentials::from_config(&config)?;
    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop, nvs, credentials, config.wifi_poll_ms)?;
    wifi.connect_blocking()?;

    let transport = MqttTransport::new(&config, &config.sensor_client_id);
    let mut link = Link::publisher_from_config(transport, FreeRtos, &config);

    // ── 4. Publish loop ───────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut service = SensorService::new(&config);
    service.start(&mut sink);

    loop {
        service.run_cycle(&mut link, &mut board, &clock, &mut sink);
        FreeRtos::delay_ms(LOOP_TICK_MS);
    }
}
