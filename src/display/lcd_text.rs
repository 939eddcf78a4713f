//! Text for the sensor node's 16×2 character LCD.

use core::fmt::Write;

use heapless::String;

use crate::message::StatusMessage;

pub const LCD_COLS: usize = 16;

pub type LcdLine = String<LCD_COLS>;

/// Two rows: `Body:36.5C` and `Fall:YES` / `Fall:NO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdLines {
    pub top: LcdLine,
    pub bottom: LcdLine,
}

pub fn lcd_lines(msg: &StatusMessage) -> LcdLines {
    let mut top = LcdLine::new();
    // Overflow only truncates; every format below fits in 16 columns.
    if msg.body_temp.is_finite() {
        let _ = write!(top, "Body:{:.1}C", msg.body_temp);
    } else {
        let _ = top.push_str("Body:--.-C");
    }

    let mut bottom = LcdLine::new();
    let _ = write!(bottom, "Fall:{}", if msg.fall_detected { "YES" } else { "NO" });

    LcdLines { top, bottom }
}
