use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Engine-wide switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Engine", inline)]
#[serde(default)]
pub struct EngineOptions {
    /// Run reveal animations. When off, every target renders in its
    /// settled state and no element is watched.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Subscribe to a private reset channel instead of the page-session
    /// one.
    #[schemars(skip)]
    pub private_reset: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            private_reset: false,
        }
    }
}
