//! NTC thermistor ambient temperature (10 kΩ @ 25 °C, B = 3950).
//!
//! Wired in a voltage divider with a fixed resistor and read on ADC1.  The
//! Beta equation converts resistance to temperature:
//!
//! ```text
//!   V = raw · 3.3 / 4095
//!   R = R_series · V / (3.3 − V)
//!   T = 1 / (ln(R / R_nominal) / β + 1 / 298.15) − 273.15
//! ```
//!
//! A reading pinned at either rail means the probe is open or shorted and
//! yields NaN instead of a fabricated temperature.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the NTC ADC1 channel via the oneshot API (initialised
//! by hw_init).  On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::SystemConfig;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::pins::{ADC_MAX, ADC_VREF};

#[cfg(not(target_os = "espidf"))]
static SIM_NTC_ADC: AtomicU16 = AtomicU16::new(ADC_MAX / 2);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ntc_adc(raw: u16) {
    SIM_NTC_ADC.store(raw, Ordering::Relaxed);
}

const T25_K: f32 = 298.15;
const KELVIN: f32 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NtcParams {
    pub beta: f32,
    pub series_ohms: f32,
    pub nominal_ohms: f32,
}

impl Default for NtcParams {
    fn default() -> Self {
        Self {
            beta: 3950.0,
            series_ohms: 10_000.0,
            nominal_ohms: 10_000.0,
        }
    }
}

impl NtcParams {
    pub fn from_config(cfg: &SystemConfig) -> Self {
        Self {
            beta: cfg.ntc_beta,
            series_ohms: cfg.ntc_series_ohms,
            nominal_ohms: cfg.ntc_nominal_ohms,
        }
    }
}

/// Convert a raw 12-bit reading to °C.  NaN at either rail.
pub fn celsius(raw: u16, p: &NtcParams) -> f32 {
    if raw == 0 || raw >= ADC_MAX {
        return f32::NAN;
    }
    let voltage = f32::from(raw) * ADC_VREF / f32::from(ADC_MAX);
    let r_ntc = p.series_ohms * voltage / (ADC_VREF - voltage);
    1.0 / ((r_ntc / p.nominal_ohms).ln() / p.beta + 1.0 / T25_K) - KELVIN
}

/// Raw ADC access for the NTC divider.
pub struct NtcSensor {
    _adc_channel: u32,
}

impl NtcSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            _adc_channel: adc_channel,
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn read_raw(&self) -> u16 {
        hw_init::adc1_read(self._adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&self) -> u16 {
        SIM_NTC_ADC.load(Ordering::Relaxed)
    }
}
