//! Reveal options with TOML preset support.
//!
//! Every tunable (observer thresholds, motion defaults, group stagger,
//! navigation timing, engine switches) is consolidated here. Options
//! serialize to/from TOML for presets stored in `presets/`.

mod engine;
mod group;
mod motion;
mod navigation;
mod observer;

use std::path::Path;

pub use engine::EngineOptions;
pub use group::GroupOptions;
pub use motion::MotionOptions;
pub use navigation::NavigationOptions;
pub use observer::ObserverOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::config::RevealConfig;
use crate::driver::SharedDriver;
use crate::error::RevealError;
use crate::group::{GroupConfig, MarkerConfig};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[group]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct RevealOptions {
    /// Intersection settings.
    pub observer: ObserverOptions,
    /// Entrance animation defaults and driver choice.
    pub motion: MotionOptions,
    /// Group stagger and timeline settings.
    pub group: GroupOptions,
    /// Route-change transition.
    pub navigation: NavigationOptions,
    /// Engine switches.
    pub engine: EngineOptions,
}

impl RevealOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(RevealOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, RevealError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RevealError> {
        let content = std::fs::read_to_string(path).map_err(RevealError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), RevealError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RevealError::Io)?;
        }
        std::fs::write(path, content).map_err(RevealError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), RevealError> {
        self.reveal_config().validate()
    }

    /// Configuration for single targets.
    #[must_use]
    pub fn reveal_config(&self) -> RevealConfig {
        let motion = &self.motion;
        let config = RevealConfig::new(motion.animation)
            .with_threshold(self.observer.threshold)
            .with_root_margin(self.observer.root_margin)
            .with_trigger_once(self.observer.trigger_once)
            .with_delay(Duration::from_millis(motion.delay_ms))
            .with_duration(Duration::from_millis(motion.duration_ms));
        match motion.easing {
            Some(easing) => config.with_easing(easing),
            None => config,
        }
    }

    /// Configuration for groups.
    #[must_use]
    pub fn group_config(&self) -> GroupConfig {
        let group = &self.group;
        let marker = group.marker.then(|| MarkerConfig {
            kind: group.marker_animation,
            duration: Duration::from_millis(group.marker_duration_ms),
            card_offset: Duration::from_millis(group.card_offset_ms),
        });
        GroupConfig {
            reveal: self.reveal_config(),
            base_stagger: Duration::from_millis(group.stagger_ms),
            alternate: group.alternate,
            marker,
            placeholder: group.placeholder.clone(),
        }
    }

    /// Build the configured animation driver.
    #[must_use]
    pub fn driver(&self) -> SharedDriver {
        self.motion.backend.driver(
            self.motion.offsets(),
            Duration::from_millis(self.motion.declared_duration_ms),
        )
    }

    /// How long a route change holds the loading state.
    #[must_use]
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.navigation.loading_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{AnimationKind, Backend};
    use crate::geometry::RootMargin;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = RevealOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: RevealOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[observer]
threshold = 0.3
root_margin = "0px 0px -100px 0px"

[motion]
easing = "ease-in-out"
"#;
        let opts = RevealOptions::from_toml(toml_str).unwrap();
        assert_eq!(opts.observer.threshold, 0.3);
        assert_eq!(opts.observer.root_margin, RootMargin::bottom_px(-100.0));
        assert_eq!(opts.motion.easing, Some(EasingFunction::EaseInOut));
        // Everything else should be default
        assert!(opts.observer.trigger_once);
        assert_eq!(opts.group.stagger_ms, 200);
        assert_eq!(opts.navigation.loading_delay_ms, 500);
        assert!(opts.engine.enabled);
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = RevealOptions::from_toml("[observer]\nthreshold = 2.0\n");
        assert!(matches!(err, Err(RevealError::InvalidConfig(_))));

        let err =
            RevealOptions::from_toml("[observer]\nroot_margin = \"10em\"\n");
        assert!(matches!(err, Err(RevealError::OptionsParse(_))));
    }

    #[test]
    fn reveal_config_maps_sections() {
        let mut opts = RevealOptions::default();
        opts.motion.animation = AnimationKind::Bounce;
        opts.motion.delay_ms = 150;
        let config = opts.reveal_config();
        assert_eq!(config.animation, AnimationKind::Bounce);
        assert_eq!(config.delay, Duration::from_millis(150));
        assert_eq!(config.easing, EasingFunction::BOUNCE);

        opts.motion.easing = Some(EasingFunction::Linear);
        assert_eq!(opts.reveal_config().easing, EasingFunction::Linear);
    }

    #[test]
    fn group_config_maps_marker() {
        let mut opts = RevealOptions::default();
        let config = opts.group_config();
        assert!(config.alternate);
        assert_eq!(config.primary_delay(1), Duration::from_millis(400));

        opts.group.marker = false;
        let config = opts.group_config();
        assert!(config.marker.is_none());
        assert_eq!(config.primary_delay(1), Duration::from_millis(200));
    }

    #[test]
    fn driver_follows_backend() {
        let mut opts = RevealOptions::default();
        assert_eq!(opts.driver().name(), "imperative");
        opts.motion.backend = Backend::Declarative;
        assert_eq!(opts.driver().name(), "declarative");
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "scroll-reveal-options-{}",
            std::process::id()
        ));
        let path = dir.join("custom.toml");
        let mut opts = RevealOptions::default();
        opts.group.placeholder = "Nothing here".to_owned();
        opts.save(&path).unwrap();

        assert_eq!(RevealOptions::load(&path).unwrap(), opts);
        assert_eq!(RevealOptions::list_presets(&dir), vec!["custom"]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bundled_presets_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("presets");
        let names = RevealOptions::list_presets(&dir);
        assert!(names.contains(&"default".to_owned()));
        for name in names {
            let path = dir.join(format!("{name}.toml"));
            assert!(RevealOptions::load(&path).is_ok(), "preset {name}");
        }
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(RevealOptions::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["observer", "motion", "group", "navigation", "engine"] {
            assert!(props.contains_key(section), "missing {section}");
        }

        let motion = &props["motion"]["properties"];
        assert!(motion.get("duration_ms").is_some());
        assert!(motion.get("backend").is_some());
        assert!(motion.get("easing").is_none());
        assert!(motion.get("declared_duration_ms").is_none());

        let observer = &props["observer"]["properties"];
        assert_eq!(observer["root_margin"]["type"], "string");
    }
}
