//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                     | Connects to                  |
//! |------------|--------------------------------|------------------------------|
//! | `hardware` | Display/Indicator/InputPort    | TM1637, RGB LED, joystick    |
//! |            | SensorPort, LcdPort            | DS18B20, NTC, MPU6050, LCD   |
//! | `inbox`    | -                              | transport task → control loop|
//! | `link`     | LinkPort                       | any TransportPort            |
//! | `log_sink` | EventSink                      | Serial log output            |
//! | `loopback` | TransportPort                  | in-process broker (host)     |
//! | `mqtt`     | TransportPort                  | ESP-IDF MQTT client over TLS |
//! | `time`     | ClockPort                      | ESP32 system timer           |
//! | `wifi`     | -                              | ESP-IDF WiFi STA             |

pub mod hardware;
pub mod inbox;
pub mod link;
pub mod log_sink;
#[cfg(not(target_os = "espidf"))]
pub mod loopback;
#[cfg(target_os = "espidf")]
pub mod mqtt;
pub mod time;
pub mod wifi;
