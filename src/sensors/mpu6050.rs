//! MPU6050 accelerometer (Z axis only).
//!
//! The I²C bus is shared with the LCD, so the driver keeps only its
//! address and borrows the bus for each transaction.

use embedded_hal::i2c::I2c;

use crate::error::SensorError;

pub struct Mpu6050 {
    addr: u8,
}

impl Mpu6050 {
    const PWR_MGMT_1: u8 = 0x6B;
    const ACCEL_CONFIG: u8 = 0x1C;
    const ACCEL_ZOUT_H: u8 = 0x3F;
    const WHO_AM_I: u8 = 0x75;
    /// ±2 g full scale.
    const LSB_PER_G: f32 = 16_384.0;

    pub fn new(addr: u8) -> Self {
        Self { addr }
    }

    /// Identity check, wake from sleep, select ±2 g.
    pub fn init<I: I2c>(&mut self, i2c: &mut I) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        i2c.write_read(self.addr, &[Self::WHO_AM_I], &mut id)
            .map_err(|_| SensorError::BusError)?;
        // WHO_AM_I holds the 7-bit address with AD0 ignored.
        if id[0] & 0x7E != 0x68 {
            return Err(SensorError::NoDevice);
        }

        i2c.write(self.addr, &[Self::PWR_MGMT_1, 0x00])
            .map_err(|_| SensorError::BusError)?;
        i2c.write(self.addr, &[Self::ACCEL_CONFIG, 0x00])
            .map_err(|_| SensorError::BusError)?;
        Ok(())
    }

    /// Vertical acceleration in g.
    pub fn read_accel_z<I: I2c>(&mut self, i2c: &mut I) -> Result<f32, SensorError> {
        let mut buf = [0u8; 2];
        i2c.write_read(self.addr, &[Self::ACCEL_ZOUT_H], &mut buf)
            .map_err(|_| SensorError::BusError)?;
        Ok(f32::from(i16::from_be_bytes(buf)) / Self::LSB_PER_G)
    }
}
