//! Visibility observer: turns raw intersection entries into
//! entered/exited events for one element.

use crate::geometry::RootMargin;
use crate::viewport::{ElementId, IntersectionEntry, Viewport};

/// Intersection settings for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    /// Fraction of the element (0–1) that must be visible.
    pub threshold: f32,
    /// Offset applied to the viewport edges.
    pub root_margin: RootMargin,
    /// Stop watching after the first entry.
    pub trigger_once: bool,
}

/// Logical visibility change reported by a [`Subscription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The element crossed into view past its threshold.
    Entered,
    /// The element left view (dropped below its threshold).
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Element was not in the document when observed; never fires.
    Inert,
    /// Watch is live in the viewport.
    Watching,
    /// Watch released; further entries are ignored.
    Disposed,
}

/// A live (or released) watch on one element.
///
/// Created with [`Subscription::observe`]. With `trigger_once`, the
/// subscription releases its watch the moment it reports
/// [`VisibilityEvent::Entered`], so the element costs no further callbacks.
#[derive(Debug, Clone)]
pub struct Subscription {
    element: ElementId,
    config: ObserverConfig,
    binding: Binding,
    /// Side of the threshold last reported; `None` until the first report.
    inside: Option<bool>,
    callbacks: usize,
}

impl Subscription {
    /// Start observing `element`.
    ///
    /// If the element is not attached to the document the subscription is
    /// inert: it never reports anything and disposing it is a no-op.
    pub fn observe(
        viewport: &mut dyn Viewport,
        element: ElementId,
        config: ObserverConfig,
    ) -> Self {
        let binding = if viewport.contains(element) {
            viewport.watch(element, &config);
            Binding::Watching
        } else {
            log::debug!("observe {element}: element not in document, inert");
            Binding::Inert
        };
        Self {
            element,
            config,
            binding,
            inside: None,
            callbacks: 0,
        }
    }

    /// Observed element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Settings captured at observe time.
    #[must_use]
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Whether the underlying watch is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.binding == Binding::Watching
    }

    /// Whether the element was missing from the document when last bound.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.binding == Binding::Inert
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.binding == Binding::Disposed
    }

    /// Number of intersection callbacks this subscription has processed.
    #[must_use]
    pub fn callbacks(&self) -> usize {
        self.callbacks
    }

    /// Feed one intersection entry.
    ///
    /// Entries for other elements, or arriving after disposal, are ignored.
    /// Consecutive entries on the same side of the threshold collapse into
    /// one event. The first entry after binding always reports, so an
    /// element that starts out of view yields [`VisibilityEvent::Exited`].
    pub fn handle(
        &mut self,
        viewport: &mut dyn Viewport,
        entry: &IntersectionEntry,
    ) -> Option<VisibilityEvent> {
        if entry.element != self.element || !self.is_active() {
            return None;
        }
        self.callbacks += 1;

        let visible = entry.is_visible(self.config.threshold);
        if self.inside == Some(visible) {
            return None;
        }
        self.inside = Some(visible);

        if visible {
            if self.config.trigger_once {
                self.dispose(viewport);
            }
            Some(VisibilityEvent::Entered)
        } else {
            Some(VisibilityEvent::Exited)
        }
    }

    /// Release the watch. Safe to call any number of times.
    pub fn dispose(&mut self, viewport: &mut dyn Viewport) {
        match self.binding {
            Binding::Watching => {
                viewport.unwatch(self.element);
                self.binding = Binding::Disposed;
            }
            Binding::Inert => self.binding = Binding::Disposed,
            Binding::Disposed => {
                log::debug!("dispose {}: already disposed", self.element);
            }
        }
    }

    /// Watch again after disposal (or retry an inert subscription).
    /// A no-op while the watch is live.
    pub fn rearm(&mut self, viewport: &mut dyn Viewport) {
        if self.is_active() {
            return;
        }
        self.inside = None;
        if viewport.contains(self.element) {
            viewport.watch(self.element, &self.config);
            self.binding = Binding::Watching;
        } else {
            self.binding = Binding::Inert;
        }
    }
}
