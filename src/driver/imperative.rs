//! Property-interpolating backend.

use web_time::Instant;

use super::style::{Offsets, Presentation, Style};
use super::{progress, Animation, AnimationDriver, Frame, Motion};

/// Drives reveals by interpolating opacity, translation and scale
/// directly, honoring each motion's duration and easing.
#[derive(Debug, Clone, Default)]
pub struct ImperativeDriver {
    offsets: Offsets,
}

impl ImperativeDriver {
    /// Driver with the given starting offsets.
    #[must_use]
    pub fn new(offsets: Offsets) -> Self {
        Self { offsets }
    }

    /// Starting offsets used for initial styles.
    #[must_use]
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }
}

impl AnimationDriver for ImperativeDriver {
    fn initial(&self, motion: &Motion) -> Presentation {
        Presentation::inline(self.offsets.initial_style(motion.kind))
    }

    fn settled(&self, _motion: &Motion) -> Presentation {
        Presentation::inline(Style::SETTLED)
    }

    fn animate(&self, motion: &Motion, start: Instant) -> Box<dyn Animation> {
        Box::new(Tween {
            from: self.offsets.initial_style(motion.kind),
            motion: *motion,
            start,
            finished: false,
            cancelled: false,
        })
    }

    fn name(&self) -> &'static str {
        "imperative"
    }
}

/// Running interpolation between a hidden style and [`Style::SETTLED`].
struct Tween {
    from: Style,
    motion: Motion,
    start: Instant,
    finished: bool,
    cancelled: bool,
}

impl Animation for Tween {
    fn sample(&mut self, now: Instant) -> Frame {
        if self.cancelled {
            return Frame {
                presentation: Presentation::inline(self.from),
                finished: false,
            };
        }
        let t = progress(self.start, self.motion.duration, now);
        if t >= 1.0 {
            self.finished = true;
        }
        let style = if self.finished {
            Style::SETTLED
        } else {
            self.from.lerp(&Style::SETTLED, self.motion.easing.evaluate(t))
        };
        Frame {
            presentation: Presentation::inline(style),
            finished: self.finished,
        }
    }

    fn cancel(&mut self) -> bool {
        if self.cancelled || self.finished {
            return false;
        }
        self.cancelled = true;
        true
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
