//! Scripted scroll scenarios for the headless simulator.
//!
//! A scenario is a TOML file describing a page layout (single targets and
//! groups placed at document offsets), the reveal options, and a list of
//! timed steps (scrolls, route changes, item updates). [`Simulation`] plays
//! it frame by frame on a [`ScrollViewport`] and records every transition.
//!
//! ```toml
//! fps = 60
//! settle_ms = 1000
//!
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [[targets]]
//! id = "about"
//! y = 900
//!
//! [[groups]]
//! id = "timeline"
//! items = ["2021", "2022", "2023"]
//! y = 1600
//!
//! [[steps]]
//! at_ms = 500
//! scroll_to = 800
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::driver::AnimationKind;
use crate::engine::{GroupHandle, RevealEngine, RevealHandle};
use crate::error::RevealError;
use crate::geometry::Rect;
use crate::machine::RevealState;
use crate::navigation::{NavigationEvent, Navigator};
use crate::options::RevealOptions;
use crate::reset::ResetChannel;
use crate::util::frame_timing::FrameClock;
use crate::viewport::ScrollViewport;

/// Window size of the simulated browser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    /// Window width in pixels.
    pub width: f32,
    /// Window height in pixels.
    pub height: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// One single reveal target on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Target id.
    pub id: String,
    /// Top edge in document coordinates.
    pub y: f32,
    /// Element height.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Entrance kind override.
    #[serde(default)]
    pub animation: Option<AnimationKind>,
    /// Start delay override, in milliseconds.
    #[serde(default)]
    pub delay_ms: Option<u64>,
    /// One-shot override.
    #[serde(default)]
    pub trigger_once: Option<bool>,
    /// Threshold override.
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// A group whose members are stacked vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Group name used in steps and the trace.
    pub id: String,
    /// Initial item ids.
    #[serde(default)]
    pub items: Vec<String>,
    /// Top edge of the first member.
    pub y: f32,
    /// Member height.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Vertical distance between member tops.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
}

/// New item list for a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetItems {
    /// Group name.
    pub group: String,
    /// Complete new item list.
    pub items: Vec<String>,
}

/// Actions performed at one instant. Several may be combined; they apply
/// in field order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Time since the start of the run, in milliseconds.
    pub at_ms: u64,
    /// Route change.
    pub navigate: Option<String>,
    /// Absolute scroll position.
    pub scroll_to: Option<f32>,
    /// Relative scroll.
    pub scroll_by: Option<f32>,
    /// Replace a group's items.
    pub set_items: Option<SetItems>,
}

/// A complete scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Reveal options.
    pub options: RevealOptions,
    /// Window size.
    pub viewport: ViewportSpec,
    /// Frame rate of the simulated clock.
    pub fps: u32,
    /// Time simulated after the last step, in milliseconds.
    pub settle_ms: u64,
    /// Single targets.
    pub targets: Vec<TargetSpec>,
    /// Groups.
    pub groups: Vec<GroupSpec>,
    /// Timed steps, in ascending `at_ms` order.
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            options: RevealOptions::default(),
            viewport: ViewportSpec::default(),
            fps: 60,
            settle_ms: 1000,
            targets: Vec::new(),
            groups: Vec::new(),
            steps: Vec::new(),
        }
    }
}

fn default_height() -> f32 {
    200.0
}

fn default_spacing() -> f32 {
    260.0
}

impl Scenario {
    /// Parse and validate a scenario.
    pub fn from_toml(content: &str) -> Result<Self, RevealError> {
        let scenario: Self = toml::from_str(content)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file.
    pub fn load(path: &Path) -> Result<Self, RevealError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Longest simulated span (last step plus settle time): one hour.
    pub const MAX_DURATION_MS: u64 = 60 * 60 * 1000;

    /// Check options, frame rate, step order, step references and the
    /// simulated span.
    pub fn validate(&self) -> Result<(), RevealError> {
        self.options.validate()?;
        if !(1..=FrameClock::MAX_FPS).contains(&self.fps) {
            return Err(RevealError::InvalidConfig(format!(
                "fps must be between 1 and {}, got {}",
                FrameClock::MAX_FPS,
                self.fps
            )));
        }
        if self.steps.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
            return Err(RevealError::InvalidConfig(
                "steps must be in ascending at_ms order".to_owned(),
            ));
        }
        for step in &self.steps {
            if let Some(set) = &step.set_items {
                if !self.groups.iter().any(|g| g.id == set.group) {
                    return Err(RevealError::InvalidConfig(format!(
                        "step at {}ms names unknown group '{}'",
                        step.at_ms, set.group
                    )));
                }
            }
        }
        let last = self.steps.iter().map(|step| step.at_ms).max().unwrap_or(0);
        let span = last.checked_add(self.settle_ms);
        if !span.is_some_and(|ms| ms <= Self::MAX_DURATION_MS) {
            return Err(RevealError::InvalidConfig(format!(
                "scenario spans more than {}ms",
                Self::MAX_DURATION_MS
            )));
        }
        Ok(())
    }
}

/// One line of the transition trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// Time since the start of the run.
    pub at: Duration,
    /// What happened.
    pub line: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Every transition and route event, in order.
    pub trace: Vec<TraceEntry>,
    /// Final state of each single target, in declaration order.
    pub targets: Vec<(String, RevealState)>,
    /// Intersection watches still live at the end.
    pub live_observers: usize,
    /// Frames simulated.
    pub frames: u64,
}

struct GroupLayout {
    name: String,
    handle: GroupHandle,
    y: f32,
    height: f32,
    spacing: f32,
    placed: usize,
}

/// A scenario being played.
pub struct Simulation {
    engine: RevealEngine<ScrollViewport>,
    navigator: Navigator,
    clock: FrameClock,
    origin: Instant,
    targets: Vec<(String, RevealHandle)>,
    groups: Vec<GroupLayout>,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    /// Lay out the page described by `scenario`. The simulation runs on a
    /// private reset channel.
    pub fn new(scenario: &Scenario, origin: Instant) -> Result<Self, RevealError> {
        scenario.validate()?;
        let options = &scenario.options;
        let channel = ResetChannel::new();
        let viewport =
            ScrollViewport::new(scenario.viewport.width, scenario.viewport.height);
        let engine = RevealEngine::new(viewport, options.driver(), &channel)
            .with_enabled(options.engine.enabled);
        let mut sim = Self {
            engine,
            navigator: Navigator::new(channel, options.loading_delay()),
            clock: FrameClock::new(origin, scenario.fps),
            origin,
            targets: Vec::new(),
            groups: Vec::new(),
            trace: Vec::new(),
        };
        for spec in &scenario.targets {
            sim.add_target(options, spec);
        }
        for spec in &scenario.groups {
            sim.add_group(options, spec);
        }
        Ok(sim)
    }

    /// Play `scenario` from the start and report.
    pub fn run(scenario: &Scenario, origin: Instant) -> Result<Report, RevealError> {
        let mut sim = Self::new(scenario, origin)?;
        sim.frame(origin);
        for step in &scenario.steps {
            sim.advance_to(origin + Duration::from_millis(step.at_ms));
            sim.apply(step);
        }
        let end = sim.clock.now() + Duration::from_millis(scenario.settle_ms);
        sim.advance_to(end);
        Ok(sim.report())
    }

    /// The engine being driven.
    #[must_use]
    pub fn engine(&self) -> &RevealEngine<ScrollViewport> {
        &self.engine
    }

    /// Summary of the run so far.
    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            trace: self.trace.clone(),
            targets: self
                .targets
                .iter()
                .filter_map(|(id, handle)| {
                    Some((id.clone(), self.engine.state(*handle)?))
                })
                .collect(),
            live_observers: self.engine.live_observers(),
            frames: self.clock.frames(),
        }
    }

    fn add_target(&mut self, options: &RevealOptions, spec: &TargetSpec) {
        let mut config = options.reveal_config();
        if let Some(kind) = spec.animation {
            config.animation = kind;
            if options.motion.easing.is_none() {
                config.easing = kind.natural_easing();
            }
        }
        if let Some(delay) = spec.delay_ms {
            config.delay = Duration::from_millis(delay);
        }
        if let Some(once) = spec.trigger_once {
            config.trigger_once = once;
        }
        if let Some(threshold) = spec.threshold {
            config.threshold = threshold;
        }
        let handle = self.engine.use_reveal(spec.id.as_str(), config);
        let width = self.engine.viewport().root().size.x;
        let element = self
            .engine
            .viewport_mut()
            .insert(Rect::new(0.0, spec.y, width, spec.height));
        let _ = self.engine.attach_ref(handle, Some(element));
        self.targets.push((spec.id.clone(), handle));
    }

    fn add_group(&mut self, options: &RevealOptions, spec: &GroupSpec) {
        let handle =
            self.engine.use_group_reveal(&spec.items, options.group_config());
        self.groups.push(GroupLayout {
            name: spec.id.clone(),
            handle,
            y: spec.y,
            height: spec.height,
            spacing: spec.spacing,
            placed: 0,
        });
        let last = self.groups.len() - 1;
        self.place_members(last, &spec.items);
    }

    /// Give an element to every member that does not have one yet, below
    /// the members already placed.
    fn place_members(&mut self, layout: usize, items: &[String]) {
        let Some(group) = self.groups.get_mut(layout) else {
            return;
        };
        let width = self.engine.viewport().root().size.x;
        for id in items {
            let attached = self
                .engine
                .group(group.handle)
                .and_then(|g| g.member(id))
                .is_some_and(|m| m.machine.element().is_some());
            if attached {
                continue;
            }
            let y = group.y + group.spacing * group.placed as f32;
            let element = self
                .engine
                .viewport_mut()
                .insert(Rect::new(0.0, y, width, group.height));
            let _ = self.engine.attach_ref_for_id(group.handle, id, Some(element));
            group.placed += 1;
        }
    }

    fn advance_to(&mut self, deadline: Instant) {
        while self.clock.now() < deadline {
            let now = self.clock.advance();
            self.frame(now);
        }
    }

    fn frame(&mut self, now: Instant) {
        for event in self.engine.tick(now) {
            self.record(now, event.to_string());
        }
        if let Some(NavigationEvent::Ready { route }) = self.navigator.tick(now) {
            self.record(now, format!("route ready: {route}"));
        }
    }

    fn apply(&mut self, step: &Step) {
        let now = self.clock.now();
        if let Some(route) = &step.navigate {
            self.navigator.navigate(route.as_str(), now);
            self.record(now, format!("navigate: {route}"));
        }
        if let Some(y) = step.scroll_to {
            self.engine.viewport_mut().scroll_to(y);
        }
        if let Some(dy) = step.scroll_by {
            self.engine.viewport_mut().scroll_by(dy);
        }
        if let Some(set) = &step.set_items {
            self.set_items(set);
        }
    }

    fn set_items(&mut self, set: &SetItems) {
        let Some(layout) = self.groups.iter().position(|g| g.name == set.group)
        else {
            log::warn!("unknown group '{}'", set.group);
            return;
        };
        let handle = self.groups[layout].handle;
        if let Some(report) = self.engine.update_group_items(handle, &set.items) {
            let now = self.clock.now();
            for id in &report.removed {
                self.record(now, format!("[{handle}] removed {id}"));
            }
        }
        self.place_members(layout, &set.items);
    }

    fn record(&mut self, now: Instant, line: String) {
        let at = now.saturating_duration_since(self.origin);
        log::info!("{:>6}ms  {line}", at.as_millis());
        self.trace.push(TraceEntry { at, line });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMELINE: &str = r#"
fps = 50
settle_ms = 2000

[viewport]
width = 800
height = 600

[[targets]]
id = "about"
y = 900

[[groups]]
id = "timeline"
items = ["2021", "2022", "2023"]
y = 1400

[[steps]]
at_ms = 100
scroll_to = 500

[[steps]]
at_ms = 1500
scroll_to = 1500
"#;

    #[test]
    fn scenario_parses_with_defaults() {
        let scenario = Scenario::from_toml(TIMELINE).unwrap();
        assert_eq!(scenario.fps, 50);
        assert_eq!(scenario.targets[0].height, 200.0);
        assert_eq!(scenario.groups[0].spacing, 260.0);
        assert_eq!(scenario.steps[1].scroll_to, Some(1500.0));
        assert!(scenario.steps[0].navigate.is_none());
    }

    #[test]
    fn timeline_run_reveals_everything_once() {
        let scenario = Scenario::from_toml(TIMELINE).unwrap();
        let report = Simulation::run(&scenario, Instant::now()).unwrap();

        assert_eq!(
            report.targets,
            vec![("about".to_owned(), RevealState::Revealed)]
        );
        let entered = report
            .trace
            .iter()
            .filter(|t| t.line.contains("(entered)"))
            .count();
        assert_eq!(entered, 4);
        let completed = report
            .trace
            .iter()
            .filter(|t| t.line.contains("(completed)"))
            .count();
        assert_eq!(completed, 4);
        assert_eq!(report.live_observers, 0);
        // 3.5s at 50fps.
        assert_eq!(report.frames, 175);
    }

    #[test]
    fn navigation_resets_and_reports_route() {
        let scenario = Scenario::from_toml(
            r#"
[[targets]]
id = "hero"
y = 0

[[steps]]
at_ms = 1000
navigate = "/projects"
"#,
        )
        .unwrap();
        let report = Simulation::run(&scenario, Instant::now()).unwrap();
        let lines: Vec<_> = report.trace.iter().map(|t| t.line.as_str()).collect();
        assert!(lines.contains(&"navigate: /projects"));
        assert!(lines.contains(&"hero: revealed -> hidden (reset)"));
        assert!(lines.contains(&"route ready: /projects"));
        // Still in view after the reset, so the reveal replayed.
        let entered = lines.iter().filter(|l| l.ends_with("(entered)")).count();
        assert_eq!(entered, 2);
        assert_eq!(report.targets[0].1, RevealState::Revealed);
    }

    #[test]
    fn set_items_adds_and_removes_members() {
        let scenario = Scenario::from_toml(
            r#"
[[groups]]
id = "projects"
items = ["a", "b"]
y = 2000

[[steps]]
at_ms = 100
set_items = { group = "projects", items = ["b", "c"] }
"#,
        )
        .unwrap();
        let mut sim = Simulation::new(&scenario, Instant::now()).unwrap();
        assert_eq!(sim.engine().live_observers(), 2);
        sim.apply(&scenario.steps[0]);
        assert_eq!(sim.engine().live_observers(), 2);
        let report = sim.report();
        assert!(report.trace[0].line.ends_with("removed a"));
    }

    #[test]
    fn bundled_demo_runs() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("demos")
            .join("portfolio.toml");
        let scenario = Scenario::load(&path).unwrap();
        let report = Simulation::run(&scenario, Instant::now()).unwrap();
        assert_eq!(report.targets.len(), 3);
        assert!(report
            .trace
            .iter()
            .any(|t| t.line == "route ready: /projects"));
    }

    #[test]
    fn invalid_scenarios_are_rejected() {
        let unordered = "[[steps]]\nat_ms = 500\n[[steps]]\nat_ms = 100\n";
        assert!(matches!(
            Scenario::from_toml(unordered),
            Err(RevealError::InvalidConfig(_))
        ));

        let unknown = "[[steps]]\nat_ms = 1\nset_items = { group = \"x\", items = [] }\n";
        assert!(matches!(
            Scenario::from_toml(unknown),
            Err(RevealError::InvalidConfig(_))
        ));

        assert!(matches!(
            Scenario::from_toml("fps = \"fast\""),
            Err(RevealError::OptionsParse(_))
        ));
    }

    #[test]
    fn frame_rate_and_span_are_bounded() {
        for fps in [0, 1001, u32::MAX] {
            assert!(
                matches!(
                    Scenario::from_toml(&format!("fps = {fps}")),
                    Err(RevealError::InvalidConfig(_))
                ),
                "fps {fps} accepted"
            );
        }
        assert!(Scenario::from_toml("fps = 1000").is_ok());

        let huge_step = format!("[[steps]]\nat_ms = {}\n", i64::MAX);
        assert!(matches!(
            Scenario::from_toml(&huge_step),
            Err(RevealError::InvalidConfig(_))
        ));
        let huge_settle = format!("settle_ms = {}\n", Scenario::MAX_DURATION_MS + 1);
        assert!(matches!(
            Scenario::from_toml(&huge_settle),
            Err(RevealError::InvalidConfig(_))
        ));

        // A clock built directly never degenerates to a zero-length frame.
        let clock = FrameClock::new(Instant::now(), u32::MAX);
        assert_eq!(clock.frame_duration(), Duration::from_millis(1));
    }
}
