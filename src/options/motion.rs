use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::driver::{AnimationKind, Backend, Offsets};
use crate::util::easing::EasingFunction;

/// Entrance animation defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Entrance kind for single targets.
    #[schemars(title = "Animation")]
    pub animation: AnimationKind,
    /// Animation length in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Wait between trigger and animation start, in milliseconds.
    #[schemars(title = "Delay (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub delay_ms: u64,
    /// Progress curve. `None` uses the animation kind's own curve.
    #[schemars(skip)]
    pub easing: Option<EasingFunction>,
    /// Which driver renders reveals.
    #[schemars(title = "Backend")]
    pub backend: Backend,
    /// Transition length the stylesheet declares for reveal classes.
    #[schemars(skip)]
    pub declared_duration_ms: u64,
    /// Horizontal slide distance in pixels.
    #[schemars(title = "Slide X (px)", range(min = 0.0, max = 400.0), extend("step" = 5.0))]
    pub slide_x_px: f32,
    /// Vertical slide distance in pixels.
    #[schemars(title = "Slide Y (px)", range(min = 0.0, max = 400.0), extend("step" = 5.0))]
    pub slide_y_px: f32,
    /// Starting scale for `scale`.
    #[schemars(skip)]
    pub scale_from: f32,
    /// Starting scale for `bounce`.
    #[schemars(skip)]
    pub bounce_from: f32,
}

impl MotionOptions {
    /// Per-kind starting offsets.
    #[must_use]
    pub fn offsets(&self) -> Offsets {
        Offsets {
            horizontal: self.slide_x_px,
            vertical: self.slide_y_px,
            scale_from: self.scale_from,
            bounce_from: self.bounce_from,
        }
    }
}

impl Default for MotionOptions {
    fn default() -> Self {
        let offsets = Offsets::default();
        Self {
            animation: AnimationKind::default(),
            duration_ms: 600,
            delay_ms: 0,
            easing: None,
            backend: Backend::default(),
            declared_duration_ms: 600,
            slide_x_px: offsets.horizontal,
            slide_y_px: offsets.vertical,
            scale_from: offsets.scale_from,
            bounce_from: offsets.bounce_from,
        }
    }
}
