use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::driver::AnimationKind;

/// Staggered group (list / timeline) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Groups", inline)]
#[serde(default)]
pub struct GroupOptions {
    /// Delay added per member index, in milliseconds.
    #[schemars(title = "Stagger (ms)", range(min = 0, max = 2000), extend("step" = 25))]
    pub stagger_ms: u64,
    /// Alternate members left and right, sliding in from their side.
    #[schemars(title = "Alternate Sides")]
    pub alternate: bool,
    /// Animate a marker ahead of each member.
    #[schemars(title = "Markers")]
    pub marker: bool,
    /// Marker entrance kind.
    #[schemars(skip)]
    pub marker_animation: AnimationKind,
    /// Marker animation length in milliseconds.
    #[schemars(title = "Marker Duration (ms)", range(min = 0, max = 2000), extend("step" = 50))]
    pub marker_duration_ms: u64,
    /// Wait between a marker and its card, in milliseconds.
    #[schemars(title = "Card Offset (ms)", range(min = 0, max = 2000), extend("step" = 25))]
    pub card_offset_ms: u64,
    /// Text shown for a group with no items.
    #[schemars(skip)]
    pub placeholder: String,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            stagger_ms: 200,
            alternate: true,
            marker: true,
            marker_animation: AnimationKind::Bounce,
            marker_duration_ms: 400,
            card_offset_ms: 200,
            placeholder: "No entries yet.".to_owned(),
        }
    }
}
