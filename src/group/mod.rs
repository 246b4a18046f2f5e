//! Group choreography: coordinated reveals for list and timeline members.
//!
//! A [`GroupChoreographer`] owns the [`GroupRegistry`] for one rendered
//! list. Each member gets a stable index in insertion order; the index
//! decides the member's side (`index % 2`) and its start delay
//! (`base_stagger * index`, plus a fixed card offset when a marker track
//! plays first).

mod registry;
mod view;

use std::fmt;

pub use registry::{GroupRegistry, Member};
pub use view::{GroupView, MemberView, Side};
use web_time::{Duration, Instant};

use crate::config::RevealConfig;
use crate::driver::{AnimationKind, Motion, SharedDriver};
use crate::machine::{RevealMachine, RevealTransition, TrackRole};
use crate::viewport::{ElementId, IntersectionEntry, Viewport};

/// Something a group renders one member for.
pub trait GroupItem {
    /// Stable id of the item.
    fn id(&self) -> &str;
}

impl GroupItem for String {
    fn id(&self) -> &str {
        self
    }
}

impl GroupItem for &str {
    fn id(&self) -> &str {
        self
    }
}

/// Marker animated ahead of each member's card (e.g. a timeline dot).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerConfig {
    /// Marker entrance kind.
    pub kind: AnimationKind,
    /// Marker animation length.
    pub duration: Duration,
    /// Extra wait between the marker's start and the card's start.
    pub card_offset: Duration,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Bounce,
            duration: Duration::from_millis(400),
            card_offset: Duration::from_millis(200),
        }
    }
}

/// Configuration shared by every member of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupConfig {
    /// Per-member reveal settings; `delay` is added before the stagger.
    pub reveal: RevealConfig,
    /// Delay added per index.
    pub base_stagger: Duration,
    /// Alternate members left/right and slide them in from their side.
    pub alternate: bool,
    /// Optional marker track.
    pub marker: Option<MarkerConfig>,
    /// Text rendered when the group has no items.
    pub placeholder: String,
}

impl GroupConfig {
    /// Plain staggered list.
    #[must_use]
    pub fn list(reveal: RevealConfig, base_stagger: Duration) -> Self {
        Self {
            reveal,
            base_stagger,
            alternate: false,
            marker: None,
            placeholder: "No entries yet.".to_owned(),
        }
    }

    /// Alternating timeline with markers.
    #[must_use]
    pub fn timeline(reveal: RevealConfig, base_stagger: Duration) -> Self {
        Self {
            alternate: true,
            marker: Some(MarkerConfig::default()),
            ..Self::list(reveal, base_stagger)
        }
    }

    /// Set the empty-group placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Start delay of the primary track for the member at `index`.
    #[must_use]
    pub fn primary_delay(&self, index: usize) -> Duration {
        let offset = self.marker.map_or(Duration::ZERO, |m| m.card_offset);
        self.marker_delay(index) + offset
    }

    /// Start delay of the marker track for the member at `index`.
    #[must_use]
    pub fn marker_delay(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.reveal.delay + self.base_stagger.saturating_mul(steps)
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::timeline(RevealConfig::default(), Duration::from_millis(200))
    }
}

/// Outcome of [`GroupChoreographer::sync_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Ids registered by this sync.
    pub added: Vec<String>,
    /// Ids disposed and removed by this sync.
    pub removed: Vec<String>,
}

/// Coordinates the members of one group.
pub struct GroupChoreographer {
    config: GroupConfig,
    driver: SharedDriver,
    registry: GroupRegistry,
    next_index: usize,
}

impl GroupChoreographer {
    /// Empty group.
    #[must_use]
    pub fn new(config: GroupConfig, driver: SharedDriver) -> Self {
        Self {
            config,
            driver,
            registry: GroupRegistry::new(),
            next_index: 0,
        }
    }

    /// Group configuration.
    #[must_use]
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Member registry.
    #[must_use]
    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Look up a member.
    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.registry.get(id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Live intersection watches owned by this group.
    #[must_use]
    pub fn live_observers(&self) -> usize {
        self.registry
            .iter()
            .filter(|m| m.machine.is_observing())
            .count()
    }

    /// Register new items and remove vanished ones.
    ///
    /// New items get the next insertion index; existing members keep
    /// theirs. Removed members are torn down before they leave the
    /// registry, so no watch or timer outlives them.
    pub fn sync_items<I: GroupItem>(
        &mut self,
        viewport: &mut dyn Viewport,
        items: &[I],
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let stale: Vec<String> = self
            .registry
            .iter()
            .filter(|m| !items.iter().any(|item| item.id() == m.id))
            .map(|m| m.id.clone())
            .collect();
        for id in stale {
            if let Some(mut member) = self.registry.remove(&id) {
                member.machine.teardown(viewport);
                report.removed.push(id);
            }
        }

        for item in items {
            let id = item.id();
            if self.registry.contains(id) {
                continue;
            }
            let member = self.build_member(id, self.next_index);
            match self.registry.insert(member) {
                Ok(()) => {
                    self.next_index += 1;
                    report.added.push(id.to_owned());
                }
                Err(_) => log::warn!("duplicate group item id '{id}'"),
            }
        }

        if !report.added.is_empty() || !report.removed.is_empty() {
            log::debug!(
                "group sync: +{} -{} ({} members)",
                report.added.len(),
                report.removed.len(),
                self.registry.len()
            );
        }
        report
    }

    /// Attach (or detach, with `None`) the element rendered for `id`.
    /// Returns `false` for unknown ids.
    pub fn attach_ref_for_id(
        &mut self,
        viewport: &mut dyn Viewport,
        id: &str,
        element: Option<ElementId>,
    ) -> bool {
        let Some(member) = self.registry.get_mut(id) else {
            log::debug!("attach for unknown group member '{id}'");
            return false;
        };
        member.machine.attach(viewport, element);
        true
    }

    /// Attach the element for `id` in its final state without watching it.
    pub fn pin_ref_for_id(
        &mut self,
        viewport: &mut dyn Viewport,
        id: &str,
        element: Option<ElementId>,
    ) -> bool {
        let Some(member) = self.registry.get_mut(id) else {
            return false;
        };
        let _ = member.machine.pin(viewport, element);
        true
    }

    /// Offer an intersection entry to the members. Returns whether a member
    /// owned the entry's element.
    pub fn handle_entry(
        &mut self,
        viewport: &mut dyn Viewport,
        entry: &IntersectionEntry,
        now: Instant,
        out: &mut Vec<RevealTransition>,
    ) -> bool {
        let Some(member) = self
            .registry
            .iter_mut()
            .find(|m| m.machine.owns(entry.element))
        else {
            return false;
        };
        out.extend(member.machine.handle_entry(viewport, entry, now));
        true
    }

    /// Advance every member's timers and animations.
    pub fn tick(
        &mut self,
        viewport: &mut dyn Viewport,
        now: Instant,
        out: &mut Vec<RevealTransition>,
    ) {
        for member in self.registry.iter_mut() {
            out.extend(member.machine.tick(viewport, now));
        }
    }

    /// Return every member to hidden and re-arm its observer.
    pub fn reset(
        &mut self,
        viewport: &mut dyn Viewport,
        out: &mut Vec<RevealTransition>,
    ) {
        for member in self.registry.iter_mut() {
            out.extend(member.machine.reset(viewport));
        }
    }

    /// Tear down every member (group unmount).
    pub fn unmount(&mut self, viewport: &mut dyn Viewport) {
        for mut member in self.registry.drain() {
            member.machine.teardown(viewport);
        }
    }

    /// Snapshot for rendering: the placeholder for an empty group, else
    /// members ordered by index.
    #[must_use]
    pub fn render(&self) -> GroupView {
        if self.registry.is_empty() {
            return GroupView::Placeholder(self.config.placeholder.clone());
        }
        let members = self
            .registry
            .ordered()
            .into_iter()
            .map(|m| MemberView {
                id: m.id.clone(),
                index: m.index,
                side: m.side,
                state: m.machine.state(),
                delay: m
                    .machine
                    .motion(TrackRole::Primary)
                    .map_or(Duration::ZERO, |motion| motion.delay),
                presentation: m
                    .machine
                    .presentation(TrackRole::Primary)
                    .unwrap_or_default(),
                marker: m.machine.presentation(TrackRole::Marker),
            })
            .collect();
        GroupView::Members(members)
    }

    fn build_member(&self, id: &str, index: usize) -> Member {
        let side = Side::from_index(index);
        let reveal = &self.config.reveal;
        let kind = if self.config.alternate {
            side.entrance()
        } else {
            reveal.animation
        };
        let primary = Motion::new(kind, reveal.duration)
            .with_delay(self.config.primary_delay(index))
            .with_easing(reveal.easing);

        let mut machine =
            RevealMachine::new(id, *reveal, self.driver.clone())
                .with_group_index(index)
                .with_primary(primary);
        if let Some(marker) = self.config.marker {
            machine = machine.with_marker(
                Motion::new(marker.kind, marker.duration)
                    .with_delay(self.config.marker_delay(index)),
            );
        }
        Member {
            id: id.to_owned(),
            index,
            side,
            machine,
        }
    }
}

impl fmt::Debug for GroupChoreographer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupChoreographer")
            .field("config", &self.config)
            .field("driver", &self.driver.name())
            .field("registry", &self.registry)
            .field("next_index", &self.next_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{shared, ImperativeDriver, Presentation};
    use crate::geometry::{Rect, RootMargin};
    use crate::machine::RevealState;
    use crate::viewport::ScrollViewport;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn driver() -> SharedDriver {
        shared(ImperativeDriver::default())
    }

    fn timeline() -> GroupChoreographer {
        let reveal = RevealConfig::default()
            .with_root_margin(RootMargin::ZERO)
            .with_duration(ms(500));
        GroupChoreographer::new(GroupConfig::timeline(reveal, ms(200)), driver())
    }

    #[test]
    fn three_entries_alternate_left_right_left() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let _ = group.sync_items(&mut vp, &["a", "b", "c"]);

        let view = group.render();
        let sides: Vec<_> = view.members().iter().map(|m| m.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
        assert_eq!(
            group.member("b").unwrap().machine.motion(TrackRole::Primary).unwrap().kind,
            AnimationKind::SlideRight
        );
    }

    #[test]
    fn empty_group_renders_placeholder_and_no_observers() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let items: [&str; 0] = [];
        let report = group.sync_items(&mut vp, &items);
        assert!(report.added.is_empty());
        assert_eq!(group.render(), GroupView::Placeholder("No entries yet.".to_owned()));
        assert_eq!(group.live_observers(), 0);
        assert_eq!(vp.watch_count(), 0);
    }

    #[test]
    fn delays_follow_index_with_card_offset() {
        let config = GroupConfig::timeline(RevealConfig::default(), ms(200));
        assert_eq!(config.marker_delay(0), ms(0));
        assert_eq!(config.marker_delay(3), ms(600));
        assert_eq!(config.primary_delay(3), ms(800));

        let list = GroupConfig::list(RevealConfig::default(), ms(150));
        assert_eq!(list.primary_delay(2), ms(300));
    }

    #[test]
    fn stagger_holds_back_later_members() {
        let mut vp = ScrollViewport::new(800.0, 2000.0);
        let reveal = RevealConfig::new(AnimationKind::Fade)
            .with_root_margin(RootMargin::ZERO)
            .with_duration(ms(100));
        let mut group =
            GroupChoreographer::new(GroupConfig::list(reveal, ms(200)), driver());
        let ids = ["m0", "m1", "m2", "m3", "m4"];
        let _ = group.sync_items(&mut vp, &ids);
        for (i, id) in ids.iter().enumerate() {
            let el = vp.insert(Rect::new(0.0, 100.0 * i as f32, 800.0, 80.0));
            assert!(group.attach_ref_for_id(&mut vp, id, Some(el)));
        }

        let t0 = Instant::now();
        let mut out = Vec::new();
        for entry in vp.take_entries() {
            assert!(group.handle_entry(&mut vp, &entry, t0, &mut out));
        }
        assert_eq!(out.len(), 5);

        // At every 50ms step, member k has started only if k*200ms passed.
        for step in 0..=20u64 {
            let now = t0 + ms(step * 50);
            group.tick(&mut vp, now, &mut out);
            for (k, id) in ids.iter().enumerate() {
                let machine = &group.member(id).unwrap().machine;
                let opacity = machine
                    .presentation(TrackRole::Primary)
                    .and_then(|p| p.opacity())
                    .unwrap();
                if now < t0 + ms(200 * k as u64) {
                    assert_eq!(opacity, 0.0, "member {k} started early");
                }
            }
        }
        assert!(group
            .registry()
            .iter()
            .all(|m| m.machine.state() == RevealState::Revealed));
    }

    #[test]
    fn removed_members_are_disposed() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let _ = group.sync_items(&mut vp, &["a", "b"]);
        let far = vp.insert(Rect::new(0.0, 5000.0, 800.0, 100.0));
        let far2 = vp.insert(Rect::new(0.0, 6000.0, 800.0, 100.0));
        assert!(group.attach_ref_for_id(&mut vp, "a", Some(far)));
        assert!(group.attach_ref_for_id(&mut vp, "b", Some(far2)));
        assert_eq!(vp.watch_count(), 2);

        let report = group.sync_items(&mut vp, &["b", "c"]);
        assert_eq!(report.removed, vec!["a".to_owned()]);
        assert_eq!(report.added, vec!["c".to_owned()]);
        assert_eq!(vp.watch_count(), 1);
        assert!(group.member("a").is_none());

        // Indices are stable: "c" continues the insertion counter.
        assert_eq!(group.member("b").unwrap().index, 1);
        assert_eq!(group.member("c").unwrap().index, 2);
        assert!(!group.attach_ref_for_id(&mut vp, "a", Some(far)));
    }

    #[test]
    fn unmount_releases_everything() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let _ = group.sync_items(&mut vp, &["a", "b"]);
        for id in ["a", "b"] {
            let el = vp.insert(Rect::new(0.0, 3000.0, 800.0, 100.0));
            assert!(group.attach_ref_for_id(&mut vp, id, Some(el)));
        }
        group.unmount(&mut vp);
        assert!(group.is_empty());
        assert_eq!(vp.watch_count(), 0);
        assert!(group.render().is_placeholder());
    }

    #[test]
    fn members_render_marker_presentations() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let _ = group.sync_items(&mut vp, &["a"]);
        let view = group.render();
        let member = &view.members()[0];
        assert_eq!(member.delay, ms(200));
        assert_eq!(member.marker.as_ref().and_then(Presentation::opacity), Some(0.0));
    }

    #[test]
    fn debug_names_the_driver() {
        let mut vp = ScrollViewport::new(800.0, 600.0);
        let mut group = timeline();
        let _ = group.sync_items(&mut vp, &["a"]);
        let debug = format!("{group:?}");
        assert!(debug.starts_with("GroupChoreographer"));
        assert!(debug.contains("imperative"), "{debug}");
    }
}
