//! Display mode identity and the static mode table.
//!
//! ```text
//! ┌──────────────┬───────────────────┬──────────────┬──────────────────┐
//! │ DisplayMode  │ name              │ edits        │ render           │
//! ├──────────────┼───────────────────┼──────────────┼──────────────────┤
//! │ CurrentData  │ CURRENT_DATA      │ -            │ body temp  36.5  │
//! │ AdjustUpper  │ ADJUST_UPPER_TEMP │ Bound::Upper │ U380             │
//! │ AdjustLower  │ ADJUST_LOWER_TEMP │ Bound::Lower │ L360             │
//! │ ReportStatus │ REPORT_STATUS     │ -            │ ALER / FALL/GOOD │
//! └──────────────┴───────────────────┴──────────────┴──────────────────┘
//! ```
//!
//! The button walks the rows top to bottom and wraps.  Every row except
//! `CurrentData` reverts to it after the idle timeout.

use crate::display::render::{self, RenderFn};

use super::thresholds::Bound;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DisplayMode {
    CurrentData = 0,
    AdjustUpper = 1,
    AdjustLower = 2,
    ReportStatus = 3,
}

impl DisplayMode {
    /// Total number of modes, used to size the table.
    pub const COUNT: usize = 4;

    /// Convert an index back to a mode.  Out-of-range indices fall back to
    /// `CurrentData`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::CurrentData,
            1 => Self::AdjustUpper,
            2 => Self::AdjustLower,
            3 => Self::ReportStatus,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::CurrentData
            }
        }
    }

    /// The next mode in the button cycle.
    pub fn next(self) -> Self {
        Self::from_index((self as usize + 1) % Self::COUNT)
    }

    pub fn descriptor(self) -> &'static ModeDescriptor {
        &MODE_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// The threshold this mode edits with the joystick, if any.
    pub fn bound(self) -> Option<Bound> {
        self.descriptor().bound
    }
}

/// One row of [`MODE_TABLE`].
pub struct ModeDescriptor {
    pub id: DisplayMode,
    pub name: &'static str,
    pub bound: Option<Bound>,
    pub render: RenderFn,
}

/// Indexed by `DisplayMode as usize`.
pub static MODE_TABLE: [ModeDescriptor; DisplayMode::COUNT] = [
    ModeDescriptor {
        id: DisplayMode::CurrentData,
        name: "CURRENT_DATA",
        bound: None,
        render: render::current_data,
    },
    ModeDescriptor {
        id: DisplayMode::AdjustUpper,
        name: "ADJUST_UPPER_TEMP",
        bound: Some(Bound::Upper),
        render: render::adjust_upper,
    },
    ModeDescriptor {
        id: DisplayMode::AdjustLower,
        name: "ADJUST_LOWER_TEMP",
        bound: Some(Bound::Lower),
        render: render::adjust_lower,
    },
    ModeDescriptor {
        id: DisplayMode::ReportStatus,
        name: "REPORT_STATUS",
        bound: None,
        render: render::report_status,
    },
];
