//! Operator-adjustable alert thresholds.
//!
//! Stored in tenths of a degree so that the 0.1 °C step and the minimum
//! gap are exact integer arithmetic.  Every mutation ends with a clamp;
//! nothing here ever rejects a change.

use crate::config::SystemConfig;

/// Which threshold an adjust mode edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Upper,
    Lower,
}

/// Direction of one threshold step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increase,
    Decrease,
}

/// Hard limits, all in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdLimits {
    pub upper_max: i16,
    pub lower_min: i16,
    pub min_gap: i16,
    pub step: i16,
}

impl Default for ThresholdLimits {
    fn default() -> Self {
        Self {
            upper_max: 420,
            lower_min: 300,
            min_gap: 5,
            step: 1,
        }
    }
}

/// Result of one [`ThresholdConfig::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// The edited bound after clamping (tenths of a degree).
    pub value: i16,
    /// The raw step was cut short by a limit or by the gap.
    pub clamped: bool,
}

impl Adjustment {
    pub fn value_c(&self) -> f32 {
        from_deci(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    upper: i16,
    lower: i16,
    limits: ThresholdLimits,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::with_limits(380, 360, ThresholdLimits::default())
    }
}

impl ThresholdConfig {
    /// Build from tenths of a degree; out-of-range input is clamped.
    pub fn with_limits(upper: i16, lower: i16, limits: ThresholdLimits) -> Self {
        // Pin the lower bound first so a too-low upper is pushed up, not down.
        let lower = lower
            .max(limits.lower_min)
            .min(limits.upper_max.saturating_sub(limits.min_gap));
        let upper = upper
            .min(limits.upper_max)
            .max(lower.saturating_add(limits.min_gap));
        Self {
            upper,
            lower,
            limits,
        }
    }

    /// Thresholds and limits from the configured defaults.
    pub fn from_config(cfg: &SystemConfig) -> Self {
        let limits = ThresholdLimits {
            upper_max: to_deci(cfg.upper_max_c),
            lower_min: to_deci(cfg.lower_min_c),
            min_gap: to_deci(cfg.min_gap_c),
            step: to_deci(cfg.threshold_step_c).max(1),
        };
        Self::with_limits(to_deci(cfg.default_upper_c), to_deci(cfg.default_lower_c), limits)
    }

    pub fn upper(&self) -> f32 {
        from_deci(self.upper)
    }

    pub fn lower(&self) -> f32 {
        from_deci(self.lower)
    }

    pub fn upper_deci(&self) -> i16 {
        self.upper
    }

    pub fn lower_deci(&self) -> i16 {
        self.lower
    }

    pub fn get(&self, bound: Bound) -> i16 {
        match bound {
            Bound::Upper => self.upper,
            Bound::Lower => self.lower,
        }
    }

    pub fn limits(&self) -> ThresholdLimits {
        self.limits
    }

    /// Move one bound by one step and clamp it against its limit and the
    /// other bound.
    pub fn adjust(&mut self, bound: Bound, step: Step) -> Adjustment {
        let delta = match step {
            Step::Increase => self.limits.step,
            Step::Decrease => -self.limits.step,
        };
        let wanted = self.get(bound).saturating_add(delta);
        match bound {
            Bound::Upper => self.upper = wanted,
            Bound::Lower => self.lower = wanted,
        }
        self.clamp(bound);
        let value = self.get(bound);
        Adjustment {
            value,
            clamped: value != wanted,
        }
    }

    /// upper ∈ [lower + gap, upper_max], lower ∈ [lower_min, upper − gap].
    /// Only the edited bound moves; the other one is already valid.
    fn clamp(&mut self, edited: Bound) {
        let l = self.limits;
        match edited {
            Bound::Upper => {
                self.upper = self
                    .upper
                    .min(l.upper_max)
                    .max(self.lower.saturating_add(l.min_gap));
            }
            Bound::Lower => {
                self.lower = self
                    .lower
                    .max(l.lower_min)
                    .min(self.upper.saturating_sub(l.min_gap));
            }
        }
    }
}

pub fn to_deci(celsius: f32) -> i16 {
    (celsius * 10.0).round() as i16
}

pub fn from_deci(deci: i16) -> f32 {
    f32::from(deci) / 10.0
}
