//! HD44780 16×2 character LCD behind a PCF8574 I²C backpack.
//!
//! The expander drives the LCD in 4-bit mode:
//!
//! ```text
//!   P7 P6 P5 P4 | P3 | P2 | P1 | P0
//!   D7 D6 D5 D4 | BL | EN | RW | RS
//! ```
//!
//! Each nibble is latched by pulsing EN.  Like [`crate::sensors::mpu6050`],
//! the driver borrows the shared bus for every call.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::display::lcd_text::LCD_COLS;
use crate::error::SensorError;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct Lcd1602 {
    addr: u8,
}

impl Lcd1602 {
    pub fn new(addr: u8) -> Self {
        Self { addr }
    }

    /// Power-on initialisation into 4-bit, two-line mode.
    pub fn init<I: I2c, D: DelayNs>(&mut self, i2c: &mut I, delay: &mut D) -> Result<(), SensorError> {
        delay.delay_ms(50);
        // Three 8-bit "function set" nibbles resynchronise the controller
        // regardless of its current mode, then switch to 4-bit.
        for _ in 0..3 {
            self.write_nibble(i2c, 0x30, false)?;
            delay.delay_ms(5);
        }
        self.write_nibble(i2c, 0x20, false)?;

        self.command(i2c, CMD_FUNCTION_4BIT_2LINE)?;
        self.command(i2c, CMD_DISPLAY_ON)?;
        self.command(i2c, CMD_CLEAR)?;
        delay.delay_ms(2);
        self.command(i2c, CMD_ENTRY_INC)
    }

    /// Overwrite both rows.  Each line is truncated or space-padded to the
    /// full width so stale characters never linger.
    pub fn write_lines<I: I2c>(&mut self, i2c: &mut I, top: &str, bottom: &str) -> Result<(), SensorError> {
        for (row, text) in [top, bottom].into_iter().enumerate() {
            self.command(i2c, CMD_SET_DDRAM | ROW_OFFSETS[row])?;
            let mut bytes = text.bytes().chain(core::iter::repeat(b' ')).take(LCD_COLS);
            bytes.try_for_each(|b| self.data(i2c, b))?;
        }
        Ok(())
    }

    fn command<I: I2c>(&mut self, i2c: &mut I, cmd: u8) -> Result<(), SensorError> {
        self.write_byte(i2c, cmd, false)
    }

    fn data<I: I2c>(&mut self, i2c: &mut I, byte: u8) -> Result<(), SensorError> {
        self.write_byte(i2c, byte, true)
    }

    fn write_byte<I: I2c>(&mut self, i2c: &mut I, byte: u8, rs: bool) -> Result<(), SensorError> {
        self.write_nibble(i2c, byte & 0xF0, rs)?;
        self.write_nibble(i2c, byte << 4, rs)
    }

    /// Present the high nibble of `bits` on D4–D7 and strobe EN.
    fn write_nibble<I: I2c>(&mut self, i2c: &mut I, bits: u8, rs: bool) -> Result<(), SensorError> {
        let base = (bits & 0xF0) | BACKLIGHT | if rs { RS } else { 0 };
        i2c.write(self.addr, &[base | EN, base])
            .map_err(|_| SensorError::BusError)
    }
}
