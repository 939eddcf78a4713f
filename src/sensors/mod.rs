//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor on the sensor node and folds read failures
//! into sentinel values so the publish loop never stalls on one bad probe.

pub mod ds18b20;
pub mod mpu6050;
pub mod ntc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use log::warn;

use ds18b20::Ds18b20;
use mpu6050::Mpu6050;
use ntc::NtcSensor;

/// Reported when the accelerometer cannot be read: at rest, no fall.
pub const ACCEL_FALLBACK_G: f32 = 1.0;

/// Free fall: the vertical axis sees (almost) no gravity.
pub fn is_free_fall(acc_z_g: f32, threshold_g: f32) -> bool {
    acc_z_g.abs() < threshold_g
}

/// Aggregates the sensor node's probes.  Owns the shared I²C bus; other
/// bus users (the LCD) borrow it through [`SensorHub::bus_mut`].
pub struct SensorHub<I, P, D> {
    bus: I,
    probe: Ds18b20<P, D>,
    ntc: NtcSensor,
    imu: Mpu6050,
    imu_ready: bool,
}

impl<I, P, D> SensorHub<I, P, D>
where
    I: I2c,
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Construct and initialise the accelerometer.  A missing IMU is
    /// retried on every read rather than failing boot.
    pub fn new(mut bus: I, probe: Ds18b20<P, D>, ntc: NtcSensor, mut imu: Mpu6050) -> Self {
        let imu_ready = match imu.init(&mut bus) {
            Ok(()) => true,
            Err(e) => {
                warn!("MPU6050 init failed: {}", e);
                false
            }
        };
        Self {
            bus,
            probe,
            ntc,
            imu,
            imu_ready,
        }
    }

    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.bus
    }

    /// Body temperature, [`ds18b20::DISCONNECTED_C`] on failure.
    pub fn body_temperature_c(&mut self) -> f32 {
        self.probe.read_celsius().unwrap_or_else(|e| {
            warn!("DS18B20 read failed: {}", e);
            ds18b20::DISCONNECTED_C
        })
    }

    pub fn ntc_raw(&mut self) -> u16 {
        self.ntc.read_raw()
    }

    /// Vertical acceleration, [`ACCEL_FALLBACK_G`] on failure.
    pub fn acceleration_z(&mut self) -> f32 {
        if !self.imu_ready {
            self.imu_ready = self.imu.init(&mut self.bus).is_ok();
            if !self.imu_ready {
                return ACCEL_FALLBACK_G;
            }
        }
        self.imu.read_accel_z(&mut self.bus).unwrap_or_else(|e| {
            warn!("MPU6050 read failed: {}", e);
            self.imu_ready = false;
            ACCEL_FALLBACK_G
        })
    }
}
