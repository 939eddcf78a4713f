//! DS18B20 body-temperature probe on a bit-banged 1-Wire bus.
//!
//! Single device on the bus, so every transaction uses SKIP ROM:
//!
//! ```text
//!  reset ─ 0xCC ─ 0x44 ─ (poll until done)
//!  reset ─ 0xCC ─ 0xBE ─ read 9 bytes ─ CRC-8 check
//! ```
//!
//! The data pin must be open-drain with an external pull-up: `set_high`
//! releases the line, `set_low` drives it.  Timing uses `DelayNs`, so on
//! ESP-IDF pass a busy-wait delay (`Ets`), not a scheduler delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

/// What the probe library reports for a missing device; kept as the
/// failure value so both node firmwares agree on it.
pub const DISCONNECTED_C: f32 = -127.0;

const SKIP_ROM: u8 = 0xCC;
const CONVERT_T: u8 = 0x44;
const READ_SCRATCHPAD: u8 = 0xBE;

/// 12-bit conversion takes up to 750 ms; poll in 10 ms slices.
const CONVERT_POLL_MS: u32 = 10;
const CONVERT_MAX_POLLS: u32 = 80;

pub struct Ds18b20<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Ds18b20<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(mut pin: P, delay: D) -> Self {
        // Idle state of the bus is released (pulled high).
        let _ = pin.set_high();
        Self { pin, delay }
    }

    /// Convert and read the temperature in °C.
    pub fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.reset()?;
        self.write_byte(SKIP_ROM)?;
        self.write_byte(CONVERT_T)?;
        self.wait_conversion()?;

        self.reset()?;
        self.write_byte(SKIP_ROM)?;
        self.write_byte(READ_SCRATCHPAD)?;
        let mut scratch = [0u8; 9];
        for b in &mut scratch {
            *b = self.read_byte()?;
        }
        decode_scratchpad(&scratch)
    }

    // ── 1-Wire primitives ─────────────────────────────────────

    /// Reset pulse; `Err(NoDevice)` when nothing answers with presence.
    fn reset(&mut self) -> Result<(), SensorError> {
        self.low()?;
        self.delay.delay_us(480);
        self.release()?;
        self.delay.delay_us(70);
        let present = self.pin.is_low().map_err(|_| SensorError::BusError)?;
        self.delay.delay_us(410);
        if present { Ok(()) } else { Err(SensorError::NoDevice) }
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), SensorError> {
        self.low()?;
        if bit {
            self.delay.delay_us(6);
            self.release()?;
            self.delay.delay_us(64);
        } else {
            self.delay.delay_us(60);
            self.release()?;
            self.delay.delay_us(10);
        }
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, SensorError> {
        self.low()?;
        self.delay.delay_us(6);
        self.release()?;
        self.delay.delay_us(9);
        let bit = self.pin.is_high().map_err(|_| SensorError::BusError)?;
        self.delay.delay_us(55);
        Ok(bit)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SensorError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, SensorError> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// The device holds the line low until the conversion completes.
    fn wait_conversion(&mut self) -> Result<(), SensorError> {
        for _ in 0..CONVERT_MAX_POLLS {
            if self.read_bit()? {
                return Ok(());
            }
            self.delay.delay_ms(CONVERT_POLL_MS);
        }
        Err(SensorError::BusError)
    }

    fn low(&mut self) -> Result<(), SensorError> {
        self.pin.set_low().map_err(|_| SensorError::BusError)
    }

    fn release(&mut self) -> Result<(), SensorError> {
        self.pin.set_high().map_err(|_| SensorError::BusError)
    }
}

/// Temperature from a 9-byte scratchpad.  Bytes 0–1 are the signed
/// reading in 1/16 °C, byte 8 the CRC of bytes 0–7.
pub fn decode_scratchpad(scratch: &[u8; 9]) -> Result<f32, SensorError> {
    if crc8(&scratch[..8]) != scratch[8] {
        return Err(SensorError::CrcMismatch);
    }
    // An all-ones read is a floating bus, and its CRC would not match.
    let raw = i16::from_le_bytes([scratch[0], scratch[1]]);
    Ok(f32::from(raw) / 16.0)
}

/// Dallas/Maxim CRC-8 (polynomial x⁸ + x⁵ + x⁴ + 1, reflected).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}
