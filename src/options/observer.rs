use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::RootMargin;

/// When a target counts as in view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Observer", inline)]
#[serde(default)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible to trigger.
    #[schemars(title = "Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub threshold: f32,
    /// CSS-style margin applied to the viewport before intersection.
    #[schemars(title = "Root Margin", with = "String")]
    pub root_margin: RootMargin,
    /// Reveal each target at most once.
    #[schemars(title = "Trigger Once")]
    pub trigger_once: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::default(),
            trigger_once: true,
        }
    }
}
