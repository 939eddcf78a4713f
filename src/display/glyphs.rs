//! Seven-segment glyph tables.
//!
//! ```text
//!      ─A─          bit: 0x01 A   0x10 E
//!     F   B              0x02 B   0x20 F
//!      ─G─               0x04 C   0x40 G
//!     E   C              0x08 D   0x80 DP
//!      ─D─  .DP
//! ```
//!
//! Letters the display cannot draw well fall back to their closest lower
//! case shape (`r`, `d`, `t`).  `G`, `P`, `H` and `S` use their usual
//! seven-segment forms and never alias a hex digit.  Anything not in a
//! table renders blank.

/// Decimal point segment, OR-ed into a digit.
pub const SEG_DP: u8 = 0x80;
/// Middle bar, used as a minus sign and as the "no value" dash.
pub const SEG_MINUS: u8 = 0x40;
pub const BLANK: u8 = 0x00;

/// Hex digits 0–F.
pub static DIGITS: [u8; 16] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
];

/// Letter codes shown by the mode and status views.
pub static LETTERS: [(char, u8); 14] = [
    ('U', 0x3E),
    ('L', 0x38),
    ('A', 0x77),
    ('E', 0x79),
    ('R', 0x50), // r
    ('F', 0x71),
    ('G', 0x3D),
    ('O', 0x3F),
    ('D', 0x5E), // d
    ('T', 0x78), // t
    ('S', 0x6D),
    ('P', 0x73),
    ('H', 0x76),
    ('C', 0x39),
];

/// Segment pattern for decimal digit `d` (0–9); out of range is blank.
pub fn digit(d: u32) -> u8 {
    if d < 10 { DIGITS[d as usize] } else { BLANK }
}

/// Segment pattern for `c`.  Letters are case-insensitive; digits, `-` and
/// space are also accepted.
pub fn glyph_for_char(c: char) -> u8 {
    let c = c.to_ascii_uppercase();
    if let Some(d) = c.to_digit(10) {
        return DIGITS[d as usize];
    }
    match c {
        '-' => SEG_MINUS,
        ' ' => BLANK,
        _ => LETTERS
            .iter()
            .find(|(l, _)| *l == c)
            .map_or(BLANK, |&(_, seg)| seg),
    }
}
