//! Joystick debounce and mode state machine.
//!
//! One call to [`InputMachine::step`] per control cycle.  The checks run in
//! a fixed order and share a single cooldown clock
//! (`last_input_activity`):
//!
//! ```text
//!  button held  && elapsed > cooldown ─▶ mode = mode.next(), touch
//!  adjust mode  && |y − center| > dz
//!               && elapsed > cooldown ─▶ bound ± step (clamped), touch
//!  mode ≠ CurrentData
//!               && elapsed > timeout  ─▶ mode = CurrentData (no touch)
//! ```
//!
//! A held button re-fires every cooldown window; there is no edge
//! detection.  Because every mutation resets the clock, at most one of the
//! three can fire per cycle.

use crate::config::SystemConfig;

use super::modes::DisplayMode;
use super::state::ControllerState;
use super::thresholds::{Bound, Step};

/// One raw reading of the joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSample {
    /// X axis, 0–4095.  Read every cycle and ignored.
    pub x: u16,
    /// Y axis, 0–4095.  Up (larger) raises the edited threshold.
    pub y: u16,
    /// Push switch asserted (the pin reads LOW).
    pub button: bool,
}

impl InputSample {
    /// Both axes at rest, button released.
    pub fn centered(center: u16) -> Self {
        Self {
            x: center,
            y: center,
            button: false,
        }
    }
}

/// What one [`InputMachine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Idle,
    ModeAdvanced {
        from: DisplayMode,
        to: DisplayMode,
    },
    ThresholdAdjusted {
        bound: Bound,
        /// New value in °C.
        value_c: f32,
        /// The step hit a limit; the value may be unchanged.
        clamped: bool,
    },
    TimedOut {
        from: DisplayMode,
    },
}

/// Timing and deadzone parameters; the state lives in [`ControllerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMachine {
    cooldown_ms: u64,
    timeout_ms: u64,
    center: u16,
    deadzone: u16,
}

impl InputMachine {
    pub fn new(cooldown_ms: u64, timeout_ms: u64, center: u16, deadzone: u16) -> Self {
        Self {
            cooldown_ms,
            timeout_ms,
            center,
            deadzone,
        }
    }

    pub fn from_config(cfg: &SystemConfig) -> Self {
        Self::new(
            u64::from(cfg.input_cooldown_ms),
            u64::from(cfg.mode_timeout_ms),
            cfg.axis_center,
            cfg.axis_deadzone,
        )
    }

    pub fn center(&self) -> u16 {
        self.center
    }

    /// Which way the Y axis is pushed, `None` inside the deadzone.
    pub fn deflection(&self, y: u16) -> Option<Step> {
        let y = u32::from(y);
        let center = u32::from(self.center);
        let dz = u32::from(self.deadzone);
        if y > center + dz {
            Some(Step::Increase)
        } else if y + dz < center {
            Some(Step::Decrease)
        } else {
            None
        }
    }

    /// Advance the machine by one poll.
    pub fn step(&self, state: &mut ControllerState, sample: InputSample, now_ms: u64) -> InputOutcome {
        let elapsed = now_ms.saturating_sub(state.last_input_activity());
        let cooled = elapsed > self.cooldown_ms;

        if sample.button && cooled {
            let from = state.mode();
            let to = from.next();
            state.set_mode(to);
            state.touch(now_ms);
            return InputOutcome::ModeAdvanced { from, to };
        }

        if let (Some(bound), Some(step)) = (state.mode().bound(), self.deflection(sample.y)) {
            if cooled {
                let adj = state.adjust_threshold(bound, step);
                state.touch(now_ms);
                return InputOutcome::ThresholdAdjusted {
                    bound,
                    value_c: adj.value_c(),
                    clamped: adj.clamped,
                };
            }
        }

        if state.mode() != DisplayMode::CurrentData && elapsed > self.timeout_ms {
            let from = state.mode();
            state.set_mode(DisplayMode::CurrentData);
            return InputOutcome::TimedOut { from };
        }

        InputOutcome::Idle
    }
}
