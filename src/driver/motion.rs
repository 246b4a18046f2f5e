//! What to animate: entrance kind plus timing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::easing::EasingFunction;

/// Entrance animation applied when a target is revealed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    /// Opacity only.
    Fade,
    /// Rises into place from below.
    #[default]
    SlideUp,
    /// Drops into place from above.
    SlideDown,
    /// Enters from the left edge.
    SlideLeft,
    /// Enters from the right edge.
    SlideRight,
    /// Grows from a slightly reduced scale.
    Scale,
    /// Pops in from a smaller scale with an overshoot.
    Bounce,
}

impl AnimationKind {
    /// Every kind, in declaration order.
    pub const ALL: [AnimationKind; 7] = [
        Self::Fade,
        Self::SlideUp,
        Self::SlideDown,
        Self::SlideLeft,
        Self::SlideRight,
        Self::Scale,
        Self::Bounce,
    ];

    /// Stylesheet modifier class for this kind.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Fade => "reveal--fade",
            Self::SlideUp => "reveal--slide-up",
            Self::SlideDown => "reveal--slide-down",
            Self::SlideLeft => "reveal--slide-left",
            Self::SlideRight => "reveal--slide-right",
            Self::Scale => "reveal--scale",
            Self::Bounce => "reveal--bounce",
        }
    }

    /// Easing that suits the kind when the caller has no preference.
    #[must_use]
    pub fn natural_easing(self) -> EasingFunction {
        match self {
            Self::Bounce => EasingFunction::BOUNCE,
            _ => EasingFunction::EaseOut,
        }
    }
}

/// One animated property track: kind, start delay, duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Entrance kind.
    pub kind: AnimationKind,
    /// Wait between the trigger and the animation start.
    pub delay: Duration,
    /// Animation length once started.
    pub duration: Duration,
    /// Progress curve.
    pub easing: EasingFunction,
}

impl Motion {
    /// Motion with no delay and the kind's natural easing.
    #[must_use]
    pub fn new(kind: AnimationKind, duration: Duration) -> Self {
        Self {
            kind,
            delay: Duration::ZERO,
            duration,
            easing: kind.natural_easing(),
        }
    }

    /// Set the start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set custom easing.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_unique() {
        let mut names: Vec<_> =
            AnimationKind::ALL.iter().map(|k| k.class_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AnimationKind::ALL.len());
    }

    #[test]
    fn bounce_defaults_to_overshoot_easing() {
        let m = Motion::new(AnimationKind::Bounce, Duration::from_millis(400));
        assert_eq!(m.easing, EasingFunction::BOUNCE);
        let m = Motion::new(AnimationKind::Fade, Duration::from_millis(400));
        assert_eq!(m.easing, EasingFunction::EaseOut);
    }
}
