//! Segment display and LCD content.
//!
//! Pure formatting only; the drivers that clock these bytes out live in
//! [`crate::drivers`].

pub mod frame;
pub mod glyphs;
pub mod lcd_text;
pub mod render;

pub use frame::Frame;
pub use lcd_text::{lcd_lines, LcdLines};
pub use render::{render, DOT_UNITS};
