//! Per-frame driving: reset handling, entry routing, animation ticks and
//! presentation output.

use std::fmt;

use web_time::Instant;

use super::{GroupHandle, RevealEngine};
use crate::driver::Presentation;
use crate::machine::{RevealMachine, RevealTransition, TrackRole};
use crate::viewport::{ElementId, IntersectionEntry, Viewport};

/// A state transition that happened during a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealEvent {
    /// Owning group, for group members.
    pub group: Option<GroupHandle>,
    /// The transition itself.
    pub transition: RevealTransition,
}

impl fmt::Display for RevealEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            Some(group) => write!(f, "[{group}] {}", self.transition),
            None => write!(f, "{}", self.transition),
        }
    }
}

/// Receives the presentation of every attached element after a frame.
pub trait PresentationSink {
    /// Apply `presentation` to the part of `element` animated by `role`.
    fn apply(
        &mut self,
        element: ElementId,
        role: TrackRole,
        presentation: &Presentation,
    );
}

impl PresentationSink for Vec<(ElementId, TrackRole, Presentation)> {
    fn apply(
        &mut self,
        element: ElementId,
        role: TrackRole,
        presentation: &Presentation,
    ) {
        self.push((element, role, presentation.clone()));
    }
}

impl<V: Viewport> RevealEngine<V> {
    /// Advance one animation frame.
    ///
    /// Order within a frame: a pending reset broadcast is applied first,
    /// then queued intersection entries are routed to their targets, then
    /// timers and animations advance to `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        if self.reset.poll() {
            if self.enabled {
                self.reset_into(&mut events);
            } else {
                log::debug!("reset ignored: reveals disabled");
            }
        }

        for entry in self.viewport.take_entries() {
            self.route_entry(&entry, now, &mut events);
        }

        for machine in self.targets.values_mut() {
            if let Some(transition) = machine.tick(&mut self.viewport, now) {
                events.push(RevealEvent {
                    group: None,
                    transition,
                });
            }
        }
        let mut buf = Vec::new();
        for (&handle, group) in &mut self.groups {
            group.tick(&mut self.viewport, now, &mut buf);
            events.extend(buf.drain(..).map(|transition| RevealEvent {
                group: Some(handle),
                transition,
            }));
        }
        events
    }

    /// Return every target to hidden right away, without waiting for a
    /// broadcast.
    pub fn reset(&mut self) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        self.reset_into(&mut events);
        events
    }

    /// Hand the presentation of every attached element to `sink`.
    pub fn render(&self, sink: &mut impl PresentationSink) {
        let grouped = self
            .groups
            .values()
            .flat_map(|g| g.registry().ordered())
            .map(|member| &member.machine);
        for machine in self.targets.values().chain(grouped) {
            apply_machine(machine, sink);
        }
    }

    fn reset_into(&mut self, events: &mut Vec<RevealEvent>) {
        log::debug!(
            "resetting {} targets and {} groups",
            self.targets.len(),
            self.groups.len()
        );
        for machine in self.targets.values_mut() {
            if let Some(transition) = machine.reset(&mut self.viewport) {
                events.push(RevealEvent {
                    group: None,
                    transition,
                });
            }
        }
        let mut buf = Vec::new();
        for (&handle, group) in &mut self.groups {
            group.reset(&mut self.viewport, &mut buf);
            events.extend(buf.drain(..).map(|transition| RevealEvent {
                group: Some(handle),
                transition,
            }));
        }
    }

    fn route_entry(
        &mut self,
        entry: &IntersectionEntry,
        now: Instant,
        events: &mut Vec<RevealEvent>,
    ) {
        if let Some(machine) =
            self.targets.values_mut().find(|m| m.owns(entry.element))
        {
            if let Some(transition) =
                machine.handle_entry(&mut self.viewport, entry, now)
            {
                events.push(RevealEvent {
                    group: None,
                    transition,
                });
            }
            return;
        }

        let mut buf = Vec::new();
        for (&handle, group) in &mut self.groups {
            if group.handle_entry(&mut self.viewport, entry, now, &mut buf) {
                events.extend(buf.drain(..).map(|transition| RevealEvent {
                    group: Some(handle),
                    transition,
                }));
                return;
            }
        }
        log::debug!("entry for unowned element {}", entry.element);
    }
}

fn apply_machine(machine: &RevealMachine, sink: &mut impl PresentationSink) {
    let Some(element) = machine.element() else {
        return;
    };
    for role in machine.roles() {
        if let Some(presentation) = machine.presentation(role) {
            sink.apply(element, role, &presentation);
        }
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::config::RevealConfig;
    use crate::driver::{shared, AnimationKind, ImperativeDriver};
    use crate::geometry::{Rect, RootMargin};
    use crate::group::{GroupConfig, Side};
    use crate::machine::{Cause, RevealState};
    use crate::navigation::Navigator;
    use crate::reset::ResetChannel;
    use crate::viewport::ScrollViewport;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn engine(channel: &ResetChannel) -> RevealEngine<ScrollViewport> {
        RevealEngine::new(
            ScrollViewport::new(800.0, 600.0),
            shared(ImperativeDriver::default()),
            channel,
        )
    }

    fn config() -> RevealConfig {
        RevealConfig::default()
            .with_root_margin(RootMargin::ZERO)
            .with_duration(ms(300))
    }

    fn place(
        engine: &mut RevealEngine<ScrollViewport>,
        y: f32,
    ) -> ElementId {
        engine
            .viewport_mut()
            .insert(Rect::new(0.0, y, 800.0, 200.0))
    }

    #[test]
    fn scroll_reveals_single_target() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let hero = engine.use_reveal("hero", config());
        let el = place(&mut engine, 1000.0);

        // Initial style is available before the element is even attached.
        assert_eq!(engine.presentation(hero).unwrap().opacity(), Some(0.0));
        assert!(engine.attach_ref(hero, Some(el)));

        let t0 = Instant::now();
        assert!(engine.tick(t0).is_empty());
        assert!(!engine.is_visible(hero));

        engine.viewport_mut().scroll_to(700.0);
        let events = engine.tick(t0 + ms(16));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].transition.to, RevealState::Revealing);
        assert!(events[0].group.is_none());
        assert!(engine.is_visible(hero));

        let events = engine.tick(t0 + ms(316));
        assert_eq!(events[0].transition.cause, Cause::Completed);
        assert_eq!(engine.live_observers(), 0);

        let mut sink: Vec<(ElementId, TrackRole, Presentation)> = Vec::new();
        engine.render(&mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].0, el);
        assert!(sink[0].2.is_revealed());
    }

    #[test]
    fn reset_returns_every_target_to_hidden() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let t0 = Instant::now();

        // Far away: stays hidden.
        let far = engine.use_reveal("far", config());
        let el = place(&mut engine, 5000.0);
        let _ = engine.attach_ref(far, Some(el));
        // In view with a long delay: revealing with a pending timer.
        let slow = engine.use_reveal("slow", config().with_delay(ms(2000)));
        let el = place(&mut engine, 0.0);
        let _ = engine.attach_ref(slow, Some(el));
        // In view, quick: revealed.
        let quick = engine.use_reveal("quick", config());
        let el = place(&mut engine, 100.0);
        let _ = engine.attach_ref(quick, Some(el));
        // Repeating, in view: revealed and still watched.
        let repeat =
            engine.use_reveal("repeat", config().with_trigger_once(false));
        let el = place(&mut engine, 200.0);
        let _ = engine.attach_ref(repeat, Some(el));

        let _ = engine.tick(t0);
        let _ = engine.tick(t0 + ms(400));
        assert_eq!(engine.state(far), Some(RevealState::Hidden));
        assert_eq!(engine.state(slow), Some(RevealState::Revealing));
        assert_eq!(engine.state(quick), Some(RevealState::Revealed));
        assert_eq!(engine.state(repeat), Some(RevealState::Revealed));
        assert!(engine.pending_timers() > 0);

        // Navigate away: the next view is elsewhere in the document.
        channel.broadcast();
        engine.viewport_mut().scroll_to(10_000.0);
        let events = engine.tick(t0 + ms(500));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.transition.cause == Cause::Reset));
        assert_eq!(engine.pending_timers(), 0);

        let _ = engine.tick(t0 + ms(5000));
        for handle in [far, slow, quick, repeat] {
            assert_eq!(engine.state(handle), Some(RevealState::Hidden));
            assert!(!engine.target(handle).unwrap().has_triggered());
        }
        // Every target is watched again.
        assert_eq!(engine.live_observers(), 4);
    }

    #[test]
    fn reset_replays_targets_still_in_view() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let t0 = Instant::now();
        let hero = engine.use_reveal("hero", config());
        let el = place(&mut engine, 0.0);
        let _ = engine.attach_ref(hero, Some(el));
        let _ = engine.tick(t0);
        let _ = engine.tick(t0 + ms(300));
        assert_eq!(engine.state(hero), Some(RevealState::Revealed));

        let mut nav = Navigator::new(channel.clone(), ms(500));
        nav.navigate("/about", t0 + ms(400));
        nav.navigate("/", t0 + ms(410));
        let events = engine.tick(t0 + ms(420));
        let causes: Vec<_> =
            events.iter().map(|e| e.transition.cause).collect();
        // Two broadcasts collapse into one reset, then the element
        // (still in view) re-enters in the same frame.
        assert_eq!(causes, vec![Cause::Reset, Cause::Entered]);
    }

    #[test]
    fn unmount_releases_watch_and_ignores_unknown_handles() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let hero = engine.use_reveal("hero", config());
        let el = place(&mut engine, 3000.0);
        let _ = engine.attach_ref(hero, Some(el));
        assert_eq!(engine.viewport().watch_count(), 1);

        assert!(engine.unmount(hero));
        assert!(!engine.unmount(hero));
        assert_eq!(engine.viewport().watch_count(), 0);
        assert!(!engine.attach_ref(hero, Some(el)));
        assert!(engine.presentation(hero).is_none());
        assert!(engine.tick(Instant::now()).is_empty());
    }

    #[test]
    fn missing_element_degrades_to_static_hidden() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let hero = engine.use_reveal("hero", config());
        assert!(engine.attach_ref(hero, Some(ElementId(999))));
        assert_eq!(engine.live_observers(), 0);
        assert!(engine.tick(Instant::now()).is_empty());
        assert_eq!(engine.state(hero), Some(RevealState::Hidden));
    }

    #[test]
    fn timeline_group_through_engine() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let items = vec!["2021".to_owned(), "2022".to_owned(), "2023".to_owned()];
        let group = engine.use_group_reveal(
            &items,
            GroupConfig::timeline(config(), ms(200)),
        );
        let view = engine.render_group(group).unwrap();
        let sides: Vec<_> = view.members().iter().map(|m| m.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);

        for (i, id) in items.iter().enumerate() {
            let el = place(&mut engine, 250.0 * i as f32);
            assert!(engine.attach_ref_for_id(group, id, Some(el)));
        }
        let t0 = Instant::now();
        let events = engine.tick(t0);
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.group == Some(group)));

        let mut sink: Vec<(ElementId, TrackRole, Presentation)> = Vec::new();
        engine.render(&mut sink);
        // Marker and card per member.
        assert_eq!(sink.len(), 6);
        assert_eq!(sink[0].1, TrackRole::Marker);

        let report = engine
            .update_group_items(group, &["2021", "2023"])
            .unwrap();
        assert_eq!(report.removed, vec!["2022".to_owned()]);
        assert!(engine.unmount_group(group));
        assert!(engine.render_group(group).is_none());
        assert_eq!(engine.viewport().watch_count(), 0);
    }

    #[test]
    fn empty_group_renders_placeholder() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let items: Vec<String> = Vec::new();
        let group = engine.use_group_reveal(&items, GroupConfig::default());
        assert!(engine.render_group(group).unwrap().is_placeholder());
        assert_eq!(engine.live_observers(), 0);
        assert_eq!(engine.viewport().watch_count(), 0);
    }

    #[test]
    fn disabled_engine_shows_everything_settled() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel).with_enabled(false);
        let hero = engine.use_reveal("hero", config());
        let el = place(&mut engine, 5000.0);
        assert!(engine.attach_ref(hero, Some(el)));
        assert!(engine.is_visible(hero));
        assert_eq!(engine.live_observers(), 0);
        assert!(engine.presentation(hero).unwrap().is_revealed());

        channel.broadcast();
        assert!(engine.tick(Instant::now()).is_empty());
        assert_eq!(engine.state(hero), Some(RevealState::Revealed));
    }

    #[test]
    fn events_display_their_group() {
        let channel = ResetChannel::new();
        let mut engine = engine(&channel);
        let group = engine.use_group_reveal(
            &["a"],
            GroupConfig::list(RevealConfig::new(AnimationKind::Fade), ms(100)),
        );
        let el = place(&mut engine, 0.0);
        let _ = engine.attach_ref_for_id(group, "a", Some(el));
        let events = engine.tick(Instant::now());
        assert_eq!(
            events[0].to_string(),
            format!("[{group}] a: hidden -> revealing (entered)")
        );
    }
}
