//! GPIO / peripheral pin assignments for the two VitaLink boards.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Both boards are classic ESP32 DevKit modules.

// ---------------------------------------------------------------------------
// Actuator node: tri-colour indicator
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 13;
pub const LED_G_GPIO: i32 = 12;
/// Wired but never lit; driven LOW so the LED shows a pure colour.
pub const LED_B_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Actuator node: TM1637 4-digit segment display
// ---------------------------------------------------------------------------

pub const TM1637_CLK_GPIO: i32 = 27;
pub const TM1637_DIO_GPIO: i32 = 26;
/// Brightness 0–7 written in the display-control command.
pub const TM1637_BRIGHTNESS: u8 = 7;

// ---------------------------------------------------------------------------
// Actuator node: joystick (ADC1 + active-low switch)
// ---------------------------------------------------------------------------

/// X axis, GPIO 34 = ADC1 channel 6.  Sampled but not used for editing.
pub const JOY_X_GPIO: i32 = 34;
pub const JOY_X_ADC_CH: u32 = 6;
/// Y axis, GPIO 35 = ADC1 channel 7.  Drives threshold edits.
pub const JOY_Y_GPIO: i32 = 35;
pub const JOY_Y_ADC_CH: u32 = 7;
/// Push switch, LOW when pressed (internal pull-up).
pub const JOY_SW_GPIO: i32 = 32;

// ---------------------------------------------------------------------------
// Sensor node
// ---------------------------------------------------------------------------

/// DS18B20 1-Wire data line (external 4.7 kΩ pull-up).
pub const ONE_WIRE_GPIO: i32 = 4;

/// NTC divider tap, GPIO 34 = ADC1 channel 6.
pub const NTC_ADC_GPIO: i32 = 34;
pub const NTC_ADC_CH: u32 = 6;

/// Shared I²C bus for the MPU6050 and the LCD backpack.
pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
pub const I2C_FREQ_HZ: u32 = 100_000;

/// PCF8574 backpack address of the 16×2 LCD.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// MPU6050 address with AD0 tied low.
pub const MPU6050_I2C_ADDR: u8 = 0x68;

// ---------------------------------------------------------------------------
// ADC
// ---------------------------------------------------------------------------

/// Full-scale value of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;
/// ADC reference voltage used for the NTC conversion.
pub const ADC_VREF: f32 = 3.3;
