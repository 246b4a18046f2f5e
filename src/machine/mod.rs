//! Per-target reveal state machine.
//!
//! | Current   | Event              | Next      | Side effect                         |
//! |-----------|--------------------|-----------|-------------------------------------|
//! | hidden    | entered            | revealing | schedule tracks after their delay   |
//! | revealing | all tracks done    | revealed  | one-shot: dispose the observer      |
//! | revealing | exited (repeating) | hidden    | cancel tracks, initial styles       |
//! | revealed  | exited (repeating) | hidden    | initial styles                      |
//! | any       | reset              | hidden    | cancel tracks, re-arm the observer  |
//!
//! Entered while revealing or revealed is ignored. Tracks are always
//! cancelled (and the cancellation acknowledged) before the new state is
//! applied, so two animations never write the same element.

mod state;

pub use state::{Cause, RevealState, RevealTransition, TrackRole};
use web_time::Instant;

use crate::config::RevealConfig;
use crate::driver::{Animation, AnimationDriver, Motion, Presentation, SharedDriver};
use crate::observer::{Subscription, VisibilityEvent};
use crate::viewport::{ElementId, IntersectionEntry, Viewport};

/// One animated part of a target with its own timer.
struct Track {
    role: TrackRole,
    motion: Motion,
    /// When the animation starts; `Some` while a timer is pending or the
    /// animation is in flight.
    start_at: Option<Instant>,
    running: Option<Box<dyn Animation>>,
    /// Last sampled presentation while revealing.
    frame: Option<Presentation>,
    finished: bool,
}

impl Track {
    fn new(role: TrackRole, motion: Motion) -> Self {
        Self {
            role,
            motion,
            start_at: None,
            running: None,
            frame: None,
            finished: false,
        }
    }

    fn schedule(&mut self, triggered: Instant) {
        self.start_at = Some(triggered + self.motion.delay);
        self.finished = false;
        self.frame = None;
    }

    fn is_pending(&self) -> bool {
        self.start_at.is_some()
    }

    /// Stop the timer and any running animation. Returns whether an
    /// animation was interrupted mid-flight.
    fn cancel(&mut self) -> bool {
        let interrupted = self
            .running
            .as_mut()
            .is_some_and(|animation| animation.cancel());
        self.running = None;
        self.start_at = None;
        self.frame = None;
        self.finished = false;
        interrupted
    }

    fn advance(&mut self, driver: &dyn AnimationDriver, now: Instant) {
        let Some(start) = self.start_at else {
            return;
        };
        if self.finished || now < start {
            return;
        }
        let animation = self
            .running
            .get_or_insert_with(|| driver.animate(&self.motion, start));
        let frame = animation.sample(now);
        self.finished = frame.finished;
        self.frame = Some(frame.presentation);
        if self.finished {
            self.running = None;
            self.start_at = None;
        }
    }
}

/// State machine for one reveal target.
///
/// The machine owns its observer subscription and animation tracks.
/// Callers route intersection entries through
/// [`handle_entry`](Self::handle_entry) and advance time with
/// [`tick`](Self::tick).
pub struct RevealMachine {
    id: String,
    group_index: Option<usize>,
    config: RevealConfig,
    state: RevealState,
    has_triggered: bool,
    driver: SharedDriver,
    element: Option<ElementId>,
    subscription: Option<Subscription>,
    tracks: Vec<Track>,
}

impl RevealMachine {
    /// Hidden target with a single primary track built from `config`.
    pub fn new(
        id: impl Into<String>,
        config: RevealConfig,
        driver: SharedDriver,
    ) -> Self {
        let config = config.sanitized();
        Self {
            id: id.into(),
            group_index: None,
            config,
            state: RevealState::Hidden,
            has_triggered: false,
            driver,
            element: None,
            subscription: None,
            tracks: vec![Track::new(TrackRole::Primary, config.motion())],
        }
    }

    /// Record the target's position in its group.
    #[must_use]
    pub fn with_group_index(mut self, index: usize) -> Self {
        self.group_index = Some(index);
        self
    }

    /// Replace the primary track's motion.
    #[must_use]
    pub fn with_primary(mut self, motion: Motion) -> Self {
        if let Some(track) =
            self.tracks.iter_mut().find(|t| t.role == TrackRole::Primary)
        {
            track.motion = motion;
        }
        self
    }

    /// Add (or replace) a marker track animated alongside the primary one.
    #[must_use]
    pub fn with_marker(mut self, motion: Motion) -> Self {
        self.tracks.retain(|t| t.role != TrackRole::Marker);
        self.tracks.insert(0, Track::new(TrackRole::Marker, motion));
        self
    }

    /// Caller-assigned id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position within the owning group, if any.
    #[must_use]
    pub fn group_index(&self) -> Option<usize> {
        self.group_index
    }

    /// Configuration captured at registration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the target has entered the viewport since creation or the
    /// last reset.
    #[must_use]
    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    /// Whether the target is revealing or revealed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state != RevealState::Hidden
    }

    /// Element currently attached, if any.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Whether an intersection watch is live for this target.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// The observer subscription, if an element has been attached.
    #[must_use]
    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// Tracks with a pending timer or running animation.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_pending()).count()
    }

    /// Motion of a track.
    #[must_use]
    pub fn motion(&self, role: TrackRole) -> Option<&Motion> {
        self.tracks.iter().find(|t| t.role == role).map(|t| &t.motion)
    }

    /// Attach or detach the element (a `None` element detaches).
    ///
    /// Attaching an element that is not in the document yields an inert
    /// watch. A later attach retries it, with the same id (the element
    /// has since been connected) or a new one. One-shot targets that
    /// already revealed keep their record but are not watched again until
    /// a reset.
    pub fn attach(
        &mut self,
        viewport: &mut dyn Viewport,
        element: Option<ElementId>,
    ) {
        if self.element == element {
            if let Some(sub) = self.subscription.as_mut() {
                if sub.is_inert() {
                    sub.rearm(viewport);
                }
                return;
            }
        }
        self.release_observer(viewport);
        self.element = element;
        let Some(element) = element else {
            return;
        };
        if self.config.trigger_once && self.state == RevealState::Revealed {
            log::debug!("{}: already revealed, not re-observing", self.id);
            return;
        }
        self.subscription = Some(Subscription::observe(
            viewport,
            element,
            self.config.observer(),
        ));
    }

    /// Whether `element` belongs to this target's subscription.
    #[must_use]
    pub fn owns(&self, element: ElementId) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| s.element() == element)
    }

    /// Feed an intersection entry through the observer.
    pub fn handle_entry(
        &mut self,
        viewport: &mut dyn Viewport,
        entry: &IntersectionEntry,
        now: Instant,
    ) -> Option<RevealTransition> {
        let event = self.subscription.as_mut()?.handle(viewport, entry)?;
        self.on_visibility(event, now)
    }

    /// Apply a visibility event.
    pub fn on_visibility(
        &mut self,
        event: VisibilityEvent,
        now: Instant,
    ) -> Option<RevealTransition> {
        match (event, self.state) {
            (VisibilityEvent::Entered, RevealState::Hidden) => {
                self.has_triggered = true;
                for track in &mut self.tracks {
                    track.schedule(now);
                }
                Some(self.transition(RevealState::Revealing, Cause::Entered))
            }
            (
                VisibilityEvent::Exited,
                RevealState::Revealing | RevealState::Revealed,
            ) if !self.config.trigger_once => {
                self.cancel_tracks();
                Some(self.transition(RevealState::Hidden, Cause::Exited))
            }
            _ => None,
        }
    }

    /// Start due tracks, sample running ones, and complete the reveal once
    /// every track has finished.
    pub fn tick(
        &mut self,
        viewport: &mut dyn Viewport,
        now: Instant,
    ) -> Option<RevealTransition> {
        if self.state != RevealState::Revealing {
            return None;
        }
        for track in &mut self.tracks {
            track.advance(self.driver.as_ref(), now);
        }
        if !self.tracks.iter().all(|t| t.finished) {
            return None;
        }
        if self.config.trigger_once {
            if let Some(sub) =
                self.subscription.as_mut().filter(|s| s.is_active())
            {
                sub.dispose(viewport);
            }
        }
        Some(self.transition(RevealState::Revealed, Cause::Completed))
    }

    /// Force the target back to hidden and watch it again, so the reveal
    /// replays the next time it is in view.
    pub fn reset(
        &mut self,
        viewport: &mut dyn Viewport,
    ) -> Option<RevealTransition> {
        self.cancel_tracks();
        self.has_triggered = false;
        let transition = if self.state == RevealState::Hidden {
            None
        } else {
            Some(self.transition(RevealState::Hidden, Cause::Reset))
        };

        match (self.subscription.as_mut(), self.element) {
            (Some(sub), _) => {
                // Re-watch from scratch so an element already in view
                // reports again.
                if sub.is_active() {
                    sub.dispose(viewport);
                }
                sub.rearm(viewport);
            }
            (None, Some(element)) => {
                self.subscription = Some(Subscription::observe(
                    viewport,
                    element,
                    self.config.observer(),
                ));
            }
            (None, None) => {}
        }
        transition
    }

    /// Record the element without watching it and jump straight to the
    /// final state. Used when reveals are switched off.
    pub fn pin(
        &mut self,
        viewport: &mut dyn Viewport,
        element: Option<ElementId>,
    ) -> Option<RevealTransition> {
        self.cancel_tracks();
        self.release_observer(viewport);
        self.element = element;
        if self.state == RevealState::Revealed {
            return None;
        }
        Some(self.transition(RevealState::Revealed, Cause::Completed))
    }

    /// Cancel everything and release the observer (view unmount).
    pub fn teardown(&mut self, viewport: &mut dyn Viewport) {
        self.cancel_tracks();
        self.release_observer(viewport);
    }

    /// Presentation for one track, computed from the current state.
    #[must_use]
    pub fn presentation(&self, role: TrackRole) -> Option<Presentation> {
        let track = self.tracks.iter().find(|t| t.role == role)?;
        Some(match self.state {
            RevealState::Hidden => self.driver.initial(&track.motion),
            RevealState::Revealed => self.driver.settled(&track.motion),
            RevealState::Revealing => track
                .frame
                .clone()
                .unwrap_or_else(|| self.driver.initial(&track.motion)),
        })
    }

    /// Roles of every track, marker first.
    pub fn roles(&self) -> impl Iterator<Item = TrackRole> + '_ {
        self.tracks.iter().map(|t| t.role)
    }

    fn release_observer(&mut self, viewport: &mut dyn Viewport) {
        if let Some(mut sub) = self.subscription.take() {
            sub.dispose(viewport);
        }
    }

    fn cancel_tracks(&mut self) {
        let interrupted = self
            .tracks
            .iter_mut()
            .map(Track::cancel)
            .filter(|&interrupted| interrupted)
            .count();
        if interrupted > 0 {
            log::debug!("{}: interrupted {interrupted} animation(s)", self.id);
        }
    }

    fn transition(&mut self, to: RevealState, cause: Cause) -> RevealTransition {
        let transition = RevealTransition {
            id: self.id.clone(),
            from: self.state,
            to,
            cause,
        };
        self.state = to;
        log::debug!("{transition}");
        transition
    }
}

impl std::fmt::Debug for RevealMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealMachine")
            .field("id", &self.id)
            .field("group_index", &self.group_index)
            .field("state", &self.state)
            .field("driver", &self.driver.name())
            .field("element", &self.element)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}
