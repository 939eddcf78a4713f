//! Mock hardware adapters for integration tests.
//!
//! Records every display write and indicator change so tests can assert
//! on the full output history without touching real GPIO.

use std::cell::Cell;

use embedded_hal::delay::DelayNs;
use vitalink::app::events::AppEvent;
use vitalink::app::ports::{
    Axis, ClockPort, DisplayPort, EventSink, IndicatorPort, InputPort, LcdPort, SensorPort,
};
use vitalink::controller::InputSample;
use vitalink::display::Frame;

// ── Actuator board ────────────────────────────────────────────

pub struct MockActuatorHw {
    pub sample: InputSample,
    /// Every full frame pushed to the display.
    pub frames: Vec<[u8; 4]>,
    /// Every indicator write, `true` = alert colour.
    pub indicator: Vec<bool>,
}

#[allow(dead_code)]
impl MockActuatorHw {
    pub fn new() -> Self {
        Self {
            sample: InputSample::centered(2047),
            frames: Vec::new(),
            indicator: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.last().map(|s| Frame::from_segments(*s))
    }

    pub fn alert_lit(&self) -> bool {
        self.indicator.last().copied().unwrap_or(false)
    }

    pub fn press(&mut self, pressed: bool) {
        self.sample.button = pressed;
    }

    pub fn push_y(&mut self, y: u16) {
        self.sample.y = y;
    }
}

impl Default for MockActuatorHw {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockActuatorHw {
    fn set_glyphs_at(&mut self, start: usize, glyphs: &[u8]) {
        let mut segs = self.frames.last().copied().unwrap_or([0; 4]);
        for (i, &g) in glyphs.iter().enumerate() {
            if let Some(slot) = segs.get_mut(start + i) {
                *slot = g;
            }
        }
        self.frames.push(segs);
    }
}

impl IndicatorPort for MockActuatorHw {
    fn set_indicator(&mut self, alert: bool) {
        self.indicator.push(alert);
    }
}

impl InputPort for MockActuatorHw {
    fn read_axis_raw(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.sample.x,
            Axis::Y => self.sample.y,
        }
    }

    fn read_button(&mut self) -> bool {
        self.sample.button
    }
}

// ── Sensor board ──────────────────────────────────────────────

pub struct MockSensorHw {
    pub body_c: f32,
    pub ntc_raw: u16,
    pub acc_z: f32,
    pub lcd: Vec<(String, String)>,
}

#[allow(dead_code)]
impl MockSensorHw {
    pub fn new(body_c: f32, ntc_raw: u16, acc_z: f32) -> Self {
        Self {
            body_c,
            ntc_raw,
            acc_z,
            lcd: Vec::new(),
        }
    }
}

impl SensorPort for MockSensorHw {
    fn read_body_temperature_c(&mut self) -> f32 {
        self.body_c
    }

    fn read_ntc_raw(&mut self) -> u16 {
        self.ntc_raw
    }

    fn read_acceleration_z(&mut self) -> f32 {
        self.acc_z
    }
}

impl LcdPort for MockSensorHw {
    fn show_lines(&mut self, top: &str, bottom: &str) {
        self.lcd.push((top.into(), bottom.into()));
    }
}

// ── Clock, delay, sink ────────────────────────────────────────

/// Manually advanced millisecond clock.
#[derive(Default)]
pub struct FakeClock(Cell<u64>);

#[allow(dead_code)]
impl FakeClock {
    pub fn at(ms: u64) -> Self {
        Self(Cell::new(ms))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Records requested millisecond delays without sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Collects every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
