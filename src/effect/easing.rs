//! Easing curves applied to cluster progress.

use std::f32::consts::PI;

/// Easing function variants for animation curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Slow start, fast end.
    CubicIn,
    /// Fast start, slow end.
    #[default]
    CubicOut,
    /// Wind-up oscillation before reaching the target; dips below zero.
    ElasticIn,
    /// Overshoots past the target and settles; exceeds 1.0 mid-way.
    ElasticOut,
}

impl Easing {
    /// Evaluate at `t`, clamped to `[0, 1]`.
    ///
    /// Endpoints map to exactly 0 and 1. The elastic curves leave
    /// `[0, 1]` in between.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        const C4: f32 = (2.0 * PI) / 3.0;

        match self {
            Self::Linear => t,
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::ElasticIn => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Self::ElasticOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}
