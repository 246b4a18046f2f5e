//! Page-session reveal engine.
//!
//! [`RevealEngine`] is the one object a view layer talks to. It owns the
//! viewport, the animation driver, the reset subscription and every
//! registered target and group. Views register targets with
//! [`use_reveal`](RevealEngine::use_reveal) /
//! [`use_group_reveal`](RevealEngine::use_group_reveal), attach elements as
//! they mount, and call [`tick`](RevealEngine::tick) once per animation
//! frame followed by [`render`](RevealEngine::render).

mod frame;
mod groups;
mod targets;

use std::collections::BTreeMap;
use std::fmt;

pub use frame::{PresentationSink, RevealEvent};

use crate::driver::SharedDriver;
use crate::group::GroupChoreographer;
use crate::machine::RevealMachine;
use crate::options::RevealOptions;
use crate::reset::{ResetChannel, ResetReceiver};
use crate::viewport::Viewport;

/// Handle to a single reveal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealHandle(u64);

/// Handle to a reveal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupHandle(u64);

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Scroll-reveal engine over a [`Viewport`] implementation.
pub struct RevealEngine<V: Viewport> {
    viewport: V,
    driver: SharedDriver,
    reset: ResetReceiver,
    enabled: bool,
    targets: BTreeMap<RevealHandle, RevealMachine>,
    groups: BTreeMap<GroupHandle, GroupChoreographer>,
    next_handle: u64,
}

// ── Construction ──

impl<V: Viewport> RevealEngine<V> {
    /// Engine subscribed to `channel`.
    pub fn new(viewport: V, driver: SharedDriver, channel: &ResetChannel) -> Self {
        log::info!("reveal engine using {} driver", driver.name());
        Self {
            viewport,
            driver,
            reset: channel.subscribe(),
            enabled: true,
            targets: BTreeMap::new(),
            groups: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// Engine configured from options: driver backend, reset channel and
    /// the enabled switch.
    pub fn from_options(viewport: V, options: &RevealOptions) -> Self {
        let channel = if options.engine.private_reset {
            ResetChannel::new()
        } else {
            ResetChannel::global()
        };
        Self::new(viewport, options.driver(), &channel)
            .with_enabled(options.engine.enabled)
    }

    /// Switch reveals on or off. A disabled engine shows every attached
    /// element in its final state and watches nothing. Set this before
    /// attaching elements.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether reveals run.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// The viewport, mutably (e.g. to scroll a simulated one).
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The active driver.
    #[must_use]
    pub fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// The reset channel this engine listens on.
    #[must_use]
    pub fn reset_channel(&self) -> &ResetChannel {
        self.reset.channel()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

// ── Diagnostics ──

impl<V: Viewport> RevealEngine<V> {
    /// Live intersection watches held by targets and groups.
    #[must_use]
    pub fn live_observers(&self) -> usize {
        let singles = self
            .targets
            .values()
            .filter(|m| m.is_observing())
            .count();
        let grouped: usize =
            self.groups.values().map(GroupChoreographer::live_observers).sum();
        singles + grouped
    }

    /// Pending delay timers and running animations across the engine.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        let singles: usize =
            self.targets.values().map(RevealMachine::pending_timers).sum();
        let grouped: usize = self
            .groups
            .values()
            .flat_map(|g| g.registry().iter())
            .map(|m| m.machine.pending_timers())
            .sum();
        singles + grouped
    }

    /// Number of registered single targets.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Number of registered groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl<V: Viewport> fmt::Debug for RevealEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealEngine")
            .field("driver", &self.driver.name())
            .field("enabled", &self.enabled)
            .field("targets", &self.targets.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}
