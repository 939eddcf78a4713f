//! A full 4-digit segment frame.

use super::glyphs::{self, BLANK, SEG_DP, SEG_MINUS};

/// Number of digit positions on the module.
pub const DIGITS: usize = 4;

/// Smallest and largest value [`Frame::numeric`] can show.
pub const NUMERIC_MIN: i32 = -999;
pub const NUMERIC_MAX: i32 = 9999;

/// Segment bytes for positions 0 (left) to 3 (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame([u8; DIGITS]);

impl Frame {
    pub const fn from_segments(segments: [u8; DIGITS]) -> Self {
        Self(segments)
    }

    pub const fn blank() -> Self {
        Self([BLANK; DIGITS])
    }

    /// `----`: no value to show.
    pub const fn dashes() -> Self {
        Self([SEG_MINUS; DIGITS])
    }

    pub fn segments(&self) -> [u8; DIGITS] {
        self.0
    }

    /// Right-aligned decimal number.
    ///
    /// `dot_mask` lights the decimal point of position `k` when bit
    /// `0x80 >> k` is set.  Without `leading_zeros` unused positions are
    /// blank and a minus sign sits right before the first digit; with
    /// them, positions are zero-filled and the minus takes position 0.
    /// Values outside [`NUMERIC_MIN`]..=[`NUMERIC_MAX`] render `----`.
    pub fn numeric(value: i32, dot_mask: u8, leading_zeros: bool) -> Self {
        if !(NUMERIC_MIN..=NUMERIC_MAX).contains(&value) {
            return Self::dashes();
        }

        let mut seg = [BLANK; DIGITS];
        let mut n = value.unsigned_abs();
        let mut first = DIGITS;
        loop {
            first -= 1;
            seg[first] = glyphs::digit(n % 10);
            n /= 10;
            if n == 0 || first == 0 {
                break;
            }
        }

        if leading_zeros {
            seg[..first].fill(glyphs::digit(0));
        }
        if value < 0 {
            // The range check leaves at least one free position.
            let pos = if leading_zeros { 0 } else { first - 1 };
            seg[pos] = SEG_MINUS;
        }

        for (k, s) in seg.iter_mut().enumerate() {
            if dot_mask & (0x80 >> k) != 0 {
                *s |= SEG_DP;
            }
        }
        Self(seg)
    }

    /// Up to four characters, left-aligned; unknown characters are blank.
    pub fn word(text: &str) -> Self {
        let mut seg = [BLANK; DIGITS];
        for (s, c) in seg.iter_mut().zip(text.chars()) {
            *s = glyphs::glyph_for_char(c);
        }
        Self(seg)
    }

    /// Replace one position.  Out-of-range positions are ignored.
    #[must_use]
    pub fn with_glyph_at(mut self, pos: usize, glyph: u8) -> Self {
        if let Some(s) = self.0.get_mut(pos) {
            *s = glyph;
        }
        self
    }
}
