//! Easing curves for reveal animations.
//!
//! Every curve maps progress in `[0, 1]` to eased progress with `f(0) = 0`
//! and `f(1) = 1`. [`EasingFunction::BackOut`] overshoots past 1 in the
//! middle of the curve, which is what gives `bounce` reveals their pop.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    EaseIn,
    /// Quadratic ease-out (fast start, slow end).
    EaseOut,
    /// Cubic ease-in-out (slow at both ends).
    EaseInOut,
    /// Ease-out that overshoots the target by `overshoot` before settling.
    BackOut {
        /// Overshoot tension; 1.70158 matches the common CSS "back" curve.
        overshoot: f32,
    },
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing: cubic hermite with c1=0.33, c2=1.0 (soft ease-out).
    pub const DEFAULT: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Standard back-out curve used for bounce reveals.
    pub const BOUNCE: EasingFunction =
        EasingFunction::BackOut { overshoot: 1.701_58 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Output stays in [0.0, 1.0] for
    /// every curve except `BackOut`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            EasingFunction::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::EaseIn,
        EasingFunction::EaseOut,
        EasingFunction::EaseInOut,
        EasingFunction::BOUNCE,
        EasingFunction::DEFAULT,
    ];

    #[test]
    fn test_all_curves_hit_endpoints() {
        for easing in ALL {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!(
                (easing.evaluate(1.0) - 1.0).abs() < 1e-5,
                "{easing:?} at 1"
            );
        }
    }

    #[test]
    fn test_input_clamping() {
        assert_eq!(EasingFunction::Linear.evaluate(-0.5), 0.0);
        assert_eq!(EasingFunction::Linear.evaluate(1.5), 1.0);
        assert!((EasingFunction::BOUNCE.evaluate(3.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = EasingFunction::EaseInOut;
        assert!((e.evaluate(0.5) - 0.5).abs() < 1e-6);
        let lo = e.evaluate(0.25);
        let hi = e.evaluate(0.75);
        assert!((lo + hi - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| EasingFunction::BOUNCE.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.05, "back-out should overshoot, peak was {peak}");
    }

    #[test]
    fn test_ease_out_front_loaded() {
        assert_eq!(EasingFunction::EaseOut.evaluate(0.5), 0.75);
        assert_eq!(EasingFunction::EaseIn.evaluate(0.5), 0.25);
    }

    #[test]
    fn test_parses_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingFunction,
        }
        let w: Wrapper = toml::from_str("easing = \"ease-in-out\"").unwrap();
        assert_eq!(w.easing, EasingFunction::EaseInOut);
    }
}
