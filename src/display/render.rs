//! Per-mode frame renderers.
//!
//! Each [`DisplayMode`] row in the mode table carries one of the functions
//! below; [`render`] just dispatches through it.

use crate::controller::modes::DisplayMode;
use crate::controller::thresholds::ThresholdConfig;

use super::frame::Frame;
use super::glyphs::glyph_for_char;

/// Dot on position 2, so `0365` reads `036.5`.
pub const DOT_UNITS: u8 = 0b0010_0000;

/// Everything a renderer may look at.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub alert: bool,
    pub fall_detected: bool,
    pub body_temp: f32,
    pub thresholds: &'a ThresholdConfig,
}

pub type RenderFn = fn(&RenderInput<'_>) -> Frame;

pub fn render(
    mode: DisplayMode,
    alert: bool,
    fall_detected: bool,
    body_temp: f32,
    thresholds: &ThresholdConfig,
) -> Frame {
    let input = RenderInput {
        alert,
        fall_detected,
        body_temp,
        thresholds,
    };
    (mode.descriptor().render)(&input)
}

/// Body temperature in tenths with a fixed decimal point.
pub fn current_data(input: &RenderInput<'_>) -> Frame {
    if !input.body_temp.is_finite() {
        return Frame::dashes();
    }
    let tenths = (input.body_temp * 10.0).round();
    // Saturating cast; out-of-range values become dashes in `numeric`.
    Frame::numeric(tenths as i32, DOT_UNITS, true)
}

pub fn adjust_upper(input: &RenderInput<'_>) -> Frame {
    bound_frame('U', input.thresholds.upper_deci())
}

pub fn adjust_lower(input: &RenderInput<'_>) -> Frame {
    bound_frame('L', input.thresholds.lower_deci())
}

fn bound_frame(tag: char, deci: i16) -> Frame {
    Frame::numeric(i32::from(deci), 0, false).with_glyph_at(0, glyph_for_char(tag))
}

/// `ALER` beats `FALL` beats `GOOD`.
pub fn report_status(input: &RenderInput<'_>) -> Frame {
    let word = if input.alert {
        "ALER"
    } else if input.fall_detected {
        "FALL"
    } else {
        "GOOD"
    };
    Frame::word(word)
}
