//! Raw peripheral setup shared by both nodes.
//!
//! Configures the ADC1 oneshot unit and the raw-GPIO inputs using ESP-IDF
//! sys calls.  Pins driven through `esp-idf-hal` drivers (display, LEDs,
//! 1-Wire, I²C) are owned by the node binaries and not touched here.
//! Called once from `main()` before the loop starts.

#[cfg(target_os = "espidf")]
use core::sync::atomic::{AtomicPtr, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

/// An ESP-IDF setup call returned a non-`ESP_OK` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (what, rc) = match *self {
            Self::AdcInitFailed(rc) => ("ADC1 init", rc),
            Self::GpioConfigFailed(rc) => ("GPIO config", rc),
        };
        write!(f, "{what} failed (rc={rc})")
    }
}

impl core::error::Error for HwInitError {}

/// Joystick axes and push-button.
pub fn init_actuator_peripherals() -> Result<(), HwInitError> {
    init_adc(&[pins::JOY_X_ADC_CH, pins::JOY_Y_ADC_CH])?;
    init_button_input(pins::JOY_SW_GPIO)?;
    log::info!("hw_init: actuator peripherals configured");
    Ok(())
}

/// NTC divider.  The 1-Wire and I²C pins are claimed by their drivers.
pub fn init_sensor_peripherals() -> Result<(), HwInitError> {
    init_adc(&[pins::NTC_ADC_CH])?;
    log::info!("hw_init: sensor peripherals configured");
    Ok(())
}

// ── ADC1 oneshot ──────────────────────────────────────────────

/// Set once by [`init_adc`]; null until then.
#[cfg(target_os = "espidf")]
static ADC1_UNIT: AtomicPtr<adc_oneshot_unit_ctx_t> = AtomicPtr::new(core::ptr::null_mut());

/// Create the ADC1 unit and configure `channels` for 0–3.3 V, 12-bit.
#[cfg(target_os = "espidf")]
pub fn init_adc(channels: &[u32]) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut unit: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    // SAFETY: both pointers are valid for the duration of the call.
    esp_check(unsafe { adc_oneshot_new_unit(&init_cfg, &mut unit) }).map_err(HwInitError::AdcInitFailed)?;
    ADC1_UNIT.store(unit, Ordering::Release);

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for &ch in channels {
        // SAFETY: `unit` was just created by the driver.
        esp_check(unsafe { adc_oneshot_config_channel(unit, ch, &chan_cfg) })
            .map_err(HwInitError::AdcInitFailed)?;
    }

    info!("hw_init: ADC1 configured ({} channel(s))", channels.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(_channels: &[u32]) -> Result<(), HwInitError> {
    Ok(())
}

/// Raw 12-bit reading; 0 before [`init_adc`] or on a failed conversion.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let unit = ADC1_UNIT.load(Ordering::Acquire);
    if unit.is_null() {
        return 0;
    }
    let mut raw: i32 = 0;
    // SAFETY: `unit` is a live handle; reads only happen on the loop thread.
    match esp_check(unsafe { adc_oneshot_read(unit, channel, &mut raw) }) {
        Ok(()) => raw.clamp(0, i32::from(pins::ADC_MAX)) as u16,
        Err(_) => 0,
    }
}

#[cfg(target_os = "espidf")]
fn esp_check(rc: esp_err_t) -> Result<(), i32> {
    if rc == ESP_OK as esp_err_t { Ok(()) } else { Err(rc) }
}

// ── GPIO inputs ───────────────────────────────────────────────

/// Active-low push-button with the internal pull-up.
#[cfg(target_os = "espidf")]
pub fn init_button_input(pin: i32) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: plain register configuration from the init path.
    esp_check(unsafe { gpio_config(&cfg) }).map_err(HwInitError::GpioConfigFailed)?;
    info!("hw_init: GPIO{} input (pull-up)", pin);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_input(_pin: i32) -> Result<(), HwInitError> {
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: level read of a configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_init_succeeds() {
        assert_eq!(init_actuator_peripherals(), Ok(()));
        assert_eq!(init_sensor_peripherals(), Ok(()));
    }

    #[test]
    fn error_display_carries_return_code() {
        let e = HwInitError::AdcInitFailed(-1);
        assert_eq!(format!("{e}"), "ADC1 init failed (rc=-1)");
    }
}
