//! Animation drivers turn a reveal into concrete property changes.
//!
//! Two backends implement [`AnimationDriver`]:
//!
//! - [`DeclarativeDriver`] toggles precomputed class names and leaves the
//!   actual transition to the stylesheet. Completion is inferred from the
//!   transition duration the stylesheet declares.
//! - [`ImperativeDriver`] interpolates opacity, translation and scale
//!   itself, with per-track duration, delay and easing.
//!
//! The reveal state machine only talks to the trait, so the backend is
//! picked once at integration time (see [`Backend`]).

mod declarative;
mod imperative;
pub mod motion;
pub mod style;

use std::sync::Arc;

pub use declarative::DeclarativeDriver;
pub use imperative::ImperativeDriver;
pub use motion::{AnimationKind, Motion};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use style::{Offsets, Presentation, Style};
use web_time::{Duration, Instant};

/// One sampled frame of a running animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// What the element should look like at the sampled instant.
    pub presentation: Presentation,
    /// Whether the animation has reached its final state.
    pub finished: bool,
}

/// A started animation. Dropping it without cancelling is allowed; the
/// state machine always cancels before replacing one.
pub trait Animation {
    /// Sample the animation at `now`.
    fn sample(&mut self, now: Instant) -> Frame;

    /// Stop the animation. Returns `true` if this call performed the
    /// cancellation and `false` if it was already cancelled or finished.
    fn cancel(&mut self) -> bool;

    /// Whether [`cancel`](Self::cancel) has taken effect.
    fn is_cancelled(&self) -> bool;
}

/// Renders reveal transitions for one animation technology.
pub trait AnimationDriver: Send + Sync {
    /// Presentation before any reveal: must be applied before first paint.
    fn initial(&self, motion: &Motion) -> Presentation;

    /// Presentation once a reveal has completed.
    fn settled(&self, motion: &Motion) -> Presentation;

    /// Start animating from the initial to the settled presentation at
    /// `start`.
    fn animate(&self, motion: &Motion, start: Instant) -> Box<dyn Animation>;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Type alias for shared driver references.
pub type SharedDriver = Arc<dyn AnimationDriver>;

/// Create a shared driver from any [`AnimationDriver`] implementation.
pub fn shared<D: AnimationDriver + 'static>(driver: D) -> SharedDriver {
    Arc::new(driver)
}

/// Which driver implementation the engine links in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Class toggling with stylesheet-declared transitions.
    Declarative,
    /// Direct property interpolation.
    #[default]
    Imperative,
}

impl Backend {
    /// Build the driver for this backend.
    ///
    /// `declared_duration` is the transition length the stylesheet gives
    /// reveal classes; only the declarative backend uses it.
    #[must_use]
    pub fn driver(
        self,
        offsets: Offsets,
        declared_duration: Duration,
    ) -> SharedDriver {
        match self {
            Self::Declarative => {
                shared(DeclarativeDriver::new(declared_duration))
            }
            Self::Imperative => shared(ImperativeDriver::new(offsets)),
        }
    }
}

/// Normalized progress of an animation that began at `start`.
pub(crate) fn progress(start: Instant, duration: Duration, now: Instant) -> f32 {
    if now < start {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}
