//! Visual state of a reveal target: inline style values and class names.

use glam::Vec2;

use super::motion::AnimationKind;

/// Base class every reveal target carries.
pub const BASE_CLASS: &str = "reveal";
/// Class added once a target should show its final styles.
pub const REVEALED_CLASS: &str = "is-revealed";

/// Animated properties of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    /// 2-D offset in logical pixels.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Style {
    /// Final resting style: fully opaque, no offset, unit scale.
    pub const SETTLED: Style = Style {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Interpolate toward `end`. `t` may exceed 1.0 for overshooting
    /// curves; opacity is clamped, translate and scale are not.
    #[must_use]
    pub fn lerp(&self, end: &Style, t: f32) -> Style {
        Style {
            opacity: (self.opacity + (end.opacity - self.opacity) * t)
                .clamp(0.0, 1.0),
            translate: self.translate.lerp(end.translate, t),
            scale: self.scale + (end.scale - self.scale) * t,
        }
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::SETTLED
    }
}

/// Starting offsets for each entrance kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offsets {
    /// Horizontal travel for slide-left / slide-right.
    pub horizontal: f32,
    /// Vertical travel for slide-up / slide-down.
    pub vertical: f32,
    /// Starting scale for `scale`.
    pub scale_from: f32,
    /// Starting scale for `bounce`.
    pub bounce_from: f32,
}

impl Offsets {
    /// Initial (hidden) style for an entrance kind.
    #[must_use]
    pub fn initial_style(&self, kind: AnimationKind) -> Style {
        let hidden = Style {
            opacity: 0.0,
            ..Style::SETTLED
        };
        match kind {
            AnimationKind::Fade => hidden,
            AnimationKind::SlideUp => Style {
                translate: Vec2::new(0.0, self.vertical),
                ..hidden
            },
            AnimationKind::SlideDown => Style {
                translate: Vec2::new(0.0, -self.vertical),
                ..hidden
            },
            AnimationKind::SlideLeft => Style {
                translate: Vec2::new(-self.horizontal, 0.0),
                ..hidden
            },
            AnimationKind::SlideRight => Style {
                translate: Vec2::new(self.horizontal, 0.0),
                ..hidden
            },
            AnimationKind::Scale => Style {
                scale: self.scale_from,
                ..hidden
            },
            AnimationKind::Bounce => Style {
                scale: self.bounce_from,
                ..hidden
            },
        }
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Self {
            horizontal: 50.0,
            vertical: 30.0,
            scale_from: 0.9,
            bounce_from: 0.8,
        }
    }
}

/// Descriptor a renderer applies to an element: classes for the
/// declarative backend, an inline style for the imperative one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Presentation {
    /// Class names, in application order.
    pub classes: Vec<&'static str>,
    /// Inline style, when the backend drives properties directly.
    pub style: Option<Style>,
}

impl Presentation {
    /// Presentation carrying only an inline style.
    #[must_use]
    pub fn inline(style: Style) -> Self {
        Self {
            classes: vec![BASE_CLASS],
            style: Some(style),
        }
    }

    /// Whether the descriptor marks the element as revealed.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.classes.contains(&REVEALED_CLASS)
            || self.style.is_some_and(|s| s == Style::SETTLED)
    }

    /// Effective opacity if an inline style is present.
    #[must_use]
    pub fn opacity(&self) -> Option<f32> {
        self.style.map(|s| s.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_initial_style_is_transparent() {
        let offsets = Offsets::default();
        for kind in AnimationKind::ALL {
            assert_eq!(offsets.initial_style(kind).opacity, 0.0, "{kind:?}");
        }
    }

    #[test]
    fn slide_offsets_follow_direction() {
        let offsets = Offsets::default();
        assert_eq!(
            offsets.initial_style(AnimationKind::SlideLeft).translate,
            Vec2::new(-50.0, 0.0)
        );
        assert_eq!(
            offsets.initial_style(AnimationKind::SlideUp).translate,
            Vec2::new(0.0, 30.0)
        );
        assert_eq!(offsets.initial_style(AnimationKind::Bounce).scale, 0.8);
    }

    #[test]
    fn lerp_clamps_opacity_but_not_scale() {
        let start = Offsets::default().initial_style(AnimationKind::Bounce);
        let mid = start.lerp(&Style::SETTLED, 1.1);
        assert_eq!(mid.opacity, 1.0);
        assert!(mid.scale > 1.0);
    }

    #[test]
    fn transform_css_formats_offsets() {
        let s = Offsets::default().initial_style(AnimationKind::SlideRight);
        assert_eq!(s.transform_css(), "translate(50px, 0px) scale(1)");
    }
}
