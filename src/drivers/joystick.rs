//! Analog joystick: two ADC1 axes plus an active-low push switch.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the axes via the ADC1 oneshot API and the switch via
//! `gpio_get_level` (both configured by hw_init).  On host/test: reads from
//! static atomics so tests and the simulator can inject positions.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;
use crate::pins::ADC_MAX;

#[cfg(not(target_os = "espidf"))]
static SIM_X: AtomicU16 = AtomicU16::new(ADC_MAX / 2);
#[cfg(not(target_os = "espidf"))]
static SIM_Y: AtomicU16 = AtomicU16::new(ADC_MAX / 2);
#[cfg(not(target_os = "espidf"))]
static SIM_PRESSED: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_axes(x: u16, y: u16) {
    SIM_X.store(x.min(ADC_MAX), Ordering::Relaxed);
    SIM_Y.store(y.min(ADC_MAX), Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_button(pressed: bool) {
    SIM_PRESSED.store(pressed, Ordering::Relaxed);
}

/// Stateless handle; the pins are fixed by the board layout.
#[derive(Debug, Default)]
pub struct Joystick;

impl Joystick {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    pub fn x(&self) -> u16 {
        hw_init::adc1_read(pins::JOY_X_ADC_CH)
    }

    #[cfg(target_os = "espidf")]
    pub fn y(&self) -> u16 {
        hw_init::adc1_read(pins::JOY_Y_ADC_CH)
    }

    /// `true` while pressed (line pulled LOW).
    #[cfg(target_os = "espidf")]
    pub fn pressed(&self) -> bool {
        !hw_init::gpio_read(pins::JOY_SW_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn x(&self) -> u16 {
        SIM_X.load(Ordering::Relaxed)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn y(&self) -> u16 {
        SIM_Y.load(Ordering::Relaxed)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn pressed(&self) -> bool {
        SIM_PRESSED.load(Ordering::Relaxed)
    }
}
