use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Route-change transition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
pub struct NavigationOptions {
    /// How long the loading state is held after a route change, in
    /// milliseconds.
    #[schemars(title = "Loading Delay (ms)", range(min = 0, max = 3000), extend("step" = 50))]
    pub loading_delay_ms: u64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            loading_delay_ms: 500,
        }
    }
}
