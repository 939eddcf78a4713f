//! TM1637 4-digit LED driver, bit-banged over two GPIOs.
//!
//! The chip speaks an I²C-like two-wire protocol without addressing,
//! LSB first, with an ACK slot after every byte:
//!
//! ```text
//!  start ─ 0x40 (data, auto-increment) ─ stop
//!  start ─ 0xC0 (address 0) ─ seg0 seg1 seg2 seg3 ─ stop
//!  start ─ 0x88 | brightness (display on) ─ stop
//! ```
//!
//! Both lines are driven push-pull; the ACK is clocked but not sampled.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::display::frame::DIGITS;

const CMD_DATA_AUTO: u8 = 0x40;
const CMD_ADDRESS: u8 = 0xC0;
const CMD_DISPLAY_ON: u8 = 0x88;

/// Half-period of the bit clock.
const BIT_DELAY_US: u32 = 5;

pub struct Tm1637<C, D, DL> {
    clk: C,
    dio: D,
    delay: DL,
    brightness: u8,
}

impl<C, D, DL> Tm1637<C, D, DL>
where
    C: OutputPin,
    D: OutputPin<Error = C::Error>,
    DL: DelayNs,
{
    /// Takes the pins and parks both lines high (bus idle).
    pub fn new(mut clk: C, mut dio: D, delay: DL, brightness: u8) -> Result<Self, C::Error> {
        clk.set_high()?;
        dio.set_high()?;
        Ok(Self {
            clk,
            dio,
            delay,
            brightness: brightness.min(7),
        })
    }

    /// Write segment bytes starting at digit `start`.  Bytes past the last
    /// digit are dropped.  Stops at the first pin error.
    pub fn write_segments_at(&mut self, start: usize, segments: &[u8]) -> Result<(), C::Error> {
        if start >= DIGITS {
            return Ok(());
        }
        let n = segments.len().min(DIGITS - start);

        self.start()?;
        self.write_byte(CMD_DATA_AUTO)?;
        self.stop()?;

        self.start()?;
        self.write_byte(CMD_ADDRESS | start as u8)?;
        for &seg in &segments[..n] {
            self.write_byte(seg)?;
        }
        self.stop()?;

        self.start()?;
        self.write_byte(CMD_DISPLAY_ON | self.brightness)?;
        self.stop()
    }

    pub fn write_segments(&mut self, segments: [u8; DIGITS]) -> Result<(), C::Error> {
        self.write_segments_at(0, &segments)
    }

    // ── wire primitives ───────────────────────────────────────

    fn start(&mut self) -> Result<(), C::Error> {
        self.dio.set_high()?;
        self.clk.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        self.dio.set_low()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), C::Error> {
        self.clk.set_low()?;
        self.dio.set_low()?;
        self.delay.delay_us(BIT_DELAY_US);
        self.clk.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        self.dio.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), C::Error> {
        for i in 0..8 {
            self.clk.set_low()?;
            self.dio.set_state((byte & (1 << i) != 0).into())?;
            self.delay.delay_us(BIT_DELAY_US);
            self.clk.set_high()?;
            self.delay.delay_us(BIT_DELAY_US);
        }
        // ACK slot.
        self.clk.set_low()?;
        self.dio.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        self.clk.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        self.clk.set_low()
    }
}
