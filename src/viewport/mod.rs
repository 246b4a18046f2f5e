//! The viewport-intersection machinery the observers sit on.
//!
//! [`Viewport`] abstracts what the browser's `IntersectionObserver`
//! provides: per-element watches with a threshold and root margin, and a
//! queue of entries reported whenever a watched element crosses its
//! threshold. [`ScrollViewport`] computes the same entries from element
//! rectangles and a scroll offset so the engine can run headless.

mod scroll;

use std::fmt;

pub use scroll::ScrollViewport;

use crate::observer::ObserverConfig;

/// Opaque handle to one element in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One intersection report for a watched element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Element the report is about.
    pub element: ElementId,
    /// Visible fraction of the element within the margin-adjusted root.
    pub ratio: f32,
    /// Whether the element touches the margin-adjusted root at all.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Whether this entry satisfies `threshold`.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Source of intersection entries for watched elements.
///
/// Implementations report an entry right after an element starts being
/// watched and then every time it crosses its threshold in either
/// direction.
pub trait Viewport {
    /// Whether `element` is currently attached to the document.
    fn contains(&self, element: ElementId) -> bool;

    /// Start watching `element`. Watching an already-watched element
    /// replaces its settings.
    fn watch(&mut self, element: ElementId, config: &ObserverConfig);

    /// Stop watching `element`. Unknown elements are ignored.
    fn unwatch(&mut self, element: ElementId);

    /// Drain the entries reported since the last call.
    fn take_entries(&mut self) -> Vec<IntersectionEntry>;

    /// Number of live watches.
    fn watch_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_needs_intersection_and_ratio() {
        let e = IntersectionEntry {
            element: ElementId(1),
            ratio: 0.35,
            is_intersecting: true,
        };
        assert!(e.is_visible(0.3));
        assert!(!e.is_visible(0.4));

        let touching = IntersectionEntry {
            ratio: 0.0,
            ..e
        };
        assert!(touching.is_visible(0.0));
        let away = IntersectionEntry {
            is_intersecting: false,
            ..touching
        };
        assert!(!away.is_visible(0.0));
    }
}
