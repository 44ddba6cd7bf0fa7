//! Easing curves mapping linear progress in \[0, 1\] to eased progress.
//!
//! Every curve returns exactly 0.0 at `t <= 0` and exactly 1.0 at `t >= 1`, so
//! a finished tween always lands on its configured end value.

use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2In,
    Power2Out,
    Power3Out,
    Power4Out,
    Power2InOut,
    SineInOut,
    /// Exponential decay used by the smooth-scroll integrator.
    ExpoOut,
    BackOut(f32),
    ElasticOut { amplitude: f32, period: f32 },
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power1Out
    }
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::ExpoOut => expo_out(t),
            Ease::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let s = period / TAU * (1.0 / a).asin();
                a * (2.0_f32).powf(-10.0 * t) * ((t - s) * TAU / period).sin() + 1.0
            }
        }
    }
}

/// `1 - 2^(-10 t)` with the smooth-scroll library's 1.001 bias, clamped to 1.
#[inline]
pub fn expo_out(t: f32) -> f32 {
    (1.001 - (2.0_f32).powf(-10.0 * t)).min(1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
