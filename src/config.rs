//! Per-target reveal configuration captured at registration time.

use web_time::Duration;

use crate::driver::{AnimationKind, Motion};
use crate::error::RevealError;
use crate::geometry::RootMargin;
use crate::observer::ObserverConfig;
use crate::util::easing::EasingFunction;

/// Immutable configuration for one reveal target.
///
/// Build with [`RevealConfig::new`] (or `default()`) and the `with_*`
/// builders. The engine snapshots the value on registration; later
/// changes to the caller's copy have no effect on a live target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the target (0–1) that must be visible to trigger.
    pub threshold: f32,
    /// Offset applied to the viewport edges before intersection.
    pub root_margin: RootMargin,
    /// Reveal at most once per target lifetime.
    pub trigger_once: bool,
    /// Wait between the trigger and the animation start.
    pub delay: Duration,
    /// Entrance kind.
    pub animation: AnimationKind,
    /// Animation length (imperative backend).
    pub duration: Duration,
    /// Progress curve (imperative backend).
    pub easing: EasingFunction,
}

impl RevealConfig {
    /// Default threshold: 10% of the target visible.
    pub const DEFAULT_THRESHOLD: f32 = 0.1;
    /// Default animation length.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

    /// Configuration for the given entrance kind, all else default.
    #[must_use]
    pub fn new(animation: AnimationKind) -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            trigger_once: true,
            delay: Duration::ZERO,
            animation,
            duration: Self::DEFAULT_DURATION,
            easing: animation.natural_easing(),
        }
    }

    /// Set the visibility threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the root margin.
    #[must_use]
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Set one-shot behavior.
    #[must_use]
    pub fn with_trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    /// Set the start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the animation length.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set custom easing.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), RevealError> {
        if !self.threshold.is_finite()
            || !(0.0..=1.0).contains(&self.threshold)
        {
            return Err(RevealError::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Copy with out-of-range values pulled back into range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("{e}; clamping");
            self.threshold = if self.threshold.is_finite() {
                self.threshold.clamp(0.0, 1.0)
            } else {
                Self::DEFAULT_THRESHOLD
            };
        }
        self
    }

    /// Intersection settings for the visibility observer.
    #[must_use]
    pub fn observer(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.threshold,
            root_margin: self.root_margin,
            trigger_once: self.trigger_once,
        }
    }

    /// Primary animation track for this target.
    #[must_use]
    pub fn motion(&self) -> Motion {
        Motion::new(self.animation, self.duration)
            .with_delay(self.delay)
            .with_easing(self.easing)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new(AnimationKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = RevealConfig::default();
        assert_eq!(c.threshold, 0.1);
        assert!(c.trigger_once);
        assert_eq!(c.delay, Duration::ZERO);
        assert_eq!(c.animation, AnimationKind::SlideUp);
        assert_eq!(c.root_margin, RootMargin::bottom_px(-50.0));
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        assert!(RevealConfig::default().with_threshold(1.5).validate().is_err());
        assert!(RevealConfig::default()
            .with_threshold(f32::NAN)
            .validate()
            .is_err());
        assert!(RevealConfig::default().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn sanitized_clamps() {
        let c = RevealConfig::default().with_threshold(-0.2).sanitized();
        assert_eq!(c.threshold, 0.0);
        let c = RevealConfig::default().with_threshold(f32::NAN).sanitized();
        assert_eq!(c.threshold, RevealConfig::DEFAULT_THRESHOLD);
    }

    #[test]
    fn motion_carries_delay_and_easing() {
        let c = RevealConfig::new(AnimationKind::Scale)
            .with_delay(Duration::from_millis(150))
            .with_easing(EasingFunction::Linear);
        let m = c.motion();
        assert_eq!(m.delay, Duration::from_millis(150));
        assert_eq!(m.easing, EasingFunction::Linear);
        assert_eq!(m.kind, AnimationKind::Scale);
    }
}
