//! Class-toggling backend.

use web_time::{Duration, Instant};

use super::style::{Presentation, BASE_CLASS, REVEALED_CLASS};
use super::{Animation, AnimationDriver, Frame, Motion};

/// Drives reveals by switching class names.
///
/// Opacity, offsets and easing live in the stylesheet; the driver only
/// decides which classes an element carries. A reveal counts as finished
/// once the transition duration the stylesheet declares for
/// `.reveal` has elapsed, so per-target `duration` and `easing` are not
/// honored here.
#[derive(Debug, Clone)]
pub struct DeclarativeDriver {
    declared_duration: Duration,
}

impl DeclarativeDriver {
    /// Driver whose stylesheet transition lasts `declared_duration`.
    #[must_use]
    pub fn new(declared_duration: Duration) -> Self {
        Self { declared_duration }
    }

    /// Transition length the stylesheet is expected to declare.
    #[must_use]
    pub fn declared_duration(&self) -> Duration {
        self.declared_duration
    }
}

impl AnimationDriver for DeclarativeDriver {
    fn initial(&self, motion: &Motion) -> Presentation {
        Presentation {
            classes: vec![BASE_CLASS, motion.kind.class_name()],
            style: None,
        }
    }

    fn settled(&self, motion: &Motion) -> Presentation {
        Presentation {
            classes: vec![BASE_CLASS, motion.kind.class_name(), REVEALED_CLASS],
            style: None,
        }
    }

    fn animate(&self, motion: &Motion, start: Instant) -> Box<dyn Animation> {
        Box::new(ClassToggle {
            initial: self.initial(motion),
            settled: self.settled(motion),
            start,
            duration: self.declared_duration,
            state: ToggleState::Running,
        })
    }

    fn name(&self) -> &'static str {
        "declarative"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToggleState {
    Running,
    Finished,
    Cancelled,
}

struct ClassToggle {
    initial: Presentation,
    settled: Presentation,
    start: Instant,
    duration: Duration,
    state: ToggleState,
}

impl Animation for ClassToggle {
    fn sample(&mut self, now: Instant) -> Frame {
        if self.state == ToggleState::Cancelled || now < self.start {
            return Frame {
                presentation: self.initial.clone(),
                finished: false,
            };
        }
        // The class flips at start; the stylesheet transition runs from there.
        if now >= self.start + self.duration {
            self.state = ToggleState::Finished;
        }
        Frame {
            presentation: self.settled.clone(),
            finished: self.state == ToggleState::Finished,
        }
    }

    fn cancel(&mut self) -> bool {
        if self.state == ToggleState::Running {
            self.state = ToggleState::Cancelled;
            true
        } else {
            false
        }
    }

    fn is_cancelled(&self) -> bool {
        self.state == ToggleState::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::super::AnimationKind;
    use super::*;

    fn driver() -> DeclarativeDriver {
        DeclarativeDriver::new(Duration::from_millis(600))
    }

    #[test]
    fn initial_classes_name_the_kind() {
        let m = Motion::new(AnimationKind::SlideLeft, Duration::from_millis(10));
        let p = driver().initial(&m);
        assert_eq!(p.classes, vec!["reveal", "reveal--slide-left"]);
        assert!(p.style.is_none());
        assert!(!p.is_revealed());
    }

    #[test]
    fn completion_follows_declared_duration_not_motion() {
        let m = Motion::new(AnimationKind::Fade, Duration::from_millis(10));
        let start = Instant::now();
        let mut anim = driver().animate(&m, start);

        let mid = anim.sample(start + Duration::from_millis(300));
        assert!(mid.presentation.is_revealed());
        assert!(!mid.finished);

        let done = anim.sample(start + Duration::from_millis(600));
        assert!(done.finished);
    }

    #[test]
    fn cancel_is_idempotent_and_restores_initial() {
        let m = Motion::new(AnimationKind::Scale, Duration::from_millis(10));
        let start = Instant::now();
        let mut anim = driver().animate(&m, start);
        assert!(anim.cancel());
        assert!(!anim.cancel());
        assert!(anim.is_cancelled());
        let frame = anim.sample(start + Duration::from_secs(1));
        assert!(!frame.finished);
        assert!(!frame.presentation.is_revealed());
    }
}
