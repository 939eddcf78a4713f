//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! The drivers implement the single-concern ports directly; the two board
//! structs bundle them so each service receives one `&mut hw` that
//! satisfies every port it needs.  On non-espidf targets the joystick and
//! NTC read injectable atomics; the pin-level drivers take mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::{Axis, DisplayPort, IndicatorPort, InputPort, LcdPort, SensorPort};
use crate::drivers::indicator::Indicator;
use crate::drivers::joystick::Joystick;
use crate::drivers::lcd1602::Lcd1602;
use crate::drivers::tm1637::Tm1637;
use crate::sensors::SensorHub;

// ── Driver → port ─────────────────────────────────────────────

impl<C, D, DL> DisplayPort for Tm1637<C, D, DL>
where
    C: OutputPin,
    D: OutputPin<Error = C::Error>,
    DL: DelayNs,
{
    fn set_glyphs_at(&mut self, start: usize, glyphs: &[u8]) {
        if let Err(e) = self.write_segments_at(start, glyphs) {
            warn!("TM1637 write failed: {e:?}");
        }
    }
}

impl<R, G, B> IndicatorPort for Indicator<R, G, B>
where
    R: OutputPin,
    G: OutputPin<Error = R::Error>,
    B: OutputPin<Error = R::Error>,
{
    fn set_indicator(&mut self, alert: bool) {
        if let Err(e) = self.set(alert) {
            warn!("indicator write failed: {e:?}");
        }
    }
}

impl InputPort for Joystick {
    fn read_axis_raw(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x(),
            Axis::Y => self.y(),
        }
    }

    fn read_button(&mut self) -> bool {
        self.pressed()
    }
}

// ── Actuator board ────────────────────────────────────────────

/// Display, indicator and joystick of the actuator node.
pub struct ActuatorBoard<Disp, Ind, Inp> {
    pub display: Disp,
    pub indicator: Ind,
    pub input: Inp,
}

impl<Disp, Ind, Inp> ActuatorBoard<Disp, Ind, Inp> {
    pub fn new(display: Disp, indicator: Ind, input: Inp) -> Self {
        Self {
            display,
            indicator,
            input,
        }
    }
}

impl<Disp: DisplayPort, Ind, Inp> DisplayPort for ActuatorBoard<Disp, Ind, Inp> {
    fn set_glyphs_at(&mut self, start: usize, glyphs: &[u8]) {
        self.display.set_glyphs_at(start, glyphs);
    }
}

impl<Disp, Ind: IndicatorPort, Inp> IndicatorPort for ActuatorBoard<Disp, Ind, Inp> {
    fn set_indicator(&mut self, alert: bool) {
        self.indicator.set_indicator(alert);
    }
}

impl<Disp, Ind, Inp: InputPort> InputPort for ActuatorBoard<Disp, Ind, Inp> {
    fn read_axis_raw(&mut self, axis: Axis) -> u16 {
        self.input.read_axis_raw(axis)
    }

    fn read_button(&mut self) -> bool {
        self.input.read_button()
    }
}

// ── Sensor board ──────────────────────────────────────────────

/// Sensor hub plus the LCD sharing its I²C bus.
pub struct SensorBoard<I, P, D> {
    hub: SensorHub<I, P, D>,
    lcd: Lcd1602,
}

impl<I, P, D> SensorBoard<I, P, D>
where
    I: I2c,
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Initialise the LCD.  A missing display is logged and later writes
    /// keep failing quietly; it never blocks telemetry.
    pub fn new(mut hub: SensorHub<I, P, D>, mut lcd: Lcd1602, delay: &mut impl DelayNs) -> Self {
        if let Err(e) = lcd.init(hub.bus_mut(), delay) {
            warn!("LCD init failed: {}", e);
        }
        Self { hub, lcd }
    }
}

impl<I, P, D> SensorPort for SensorBoard<I, P, D>
where
    I: I2c,
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_body_temperature_c(&mut self) -> f32 {
        self.hub.body_temperature_c()
    }

    fn read_ntc_raw(&mut self) -> u16 {
        self.hub.ntc_raw()
    }

    fn read_acceleration_z(&mut self) -> f32 {
        self.hub.acceleration_z()
    }
}

impl<I, P, D> LcdPort for SensorBoard<I, P, D>
where
    I: I2c,
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn show_lines(&mut self, top: &str, bottom: &str) {
        if let Err(e) = self.lcd.write_lines(self.hub.bus_mut(), top, bottom) {
            warn!("LCD write failed: {}", e);
        }
    }
}
