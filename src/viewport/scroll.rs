//! Headless viewport driven by element rectangles and a scroll offset.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::{ElementId, IntersectionEntry, Viewport};
use crate::geometry::{Rect, RootMargin};
use crate::observer::ObserverConfig;

/// Watch settings plus the last side of the threshold reported.
#[derive(Debug, Clone)]
struct Watch {
    threshold: f32,
    root_margin: RootMargin,
    last_visible: Option<bool>,
}

/// A scrollable document simulated in memory.
///
/// Elements are placed with document-space rectangles; the visible root
/// is the window-sized rectangle at the current scroll offset. Entries are
/// produced lazily in [`take_entries`](Viewport::take_entries), comparing
/// each watch's current threshold side with the last one it reported.
#[derive(Debug, Clone)]
pub struct ScrollViewport {
    size: Vec2,
    scroll: Vec2,
    elements: FxHashMap<ElementId, Rect>,
    watches: FxHashMap<ElementId, Watch>,
    next_id: u64,
    /// Entries delivered so far, across all watches.
    delivered: usize,
}

impl ScrollViewport {
    /// Viewport of the given window size, scrolled to the top.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            scroll: Vec2::ZERO,
            elements: FxHashMap::default(),
            watches: FxHashMap::default(),
            next_id: 1,
            delivered: 0,
        }
    }

    /// Attach a new element at `rect` (document coordinates).
    pub fn insert(&mut self, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let _ = self.elements.insert(id, rect);
        id
    }

    /// Detach an element from the document. Its watch, if any, stays
    /// registered but stops producing entries.
    pub fn remove(&mut self, element: ElementId) -> Option<Rect> {
        self.elements.remove(&element)
    }

    /// Move or resize an element. A removed element is attached again
    /// under the same id.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        let _ = self.elements.insert(element, rect);
    }

    /// Document rectangle of an attached element.
    #[must_use]
    pub fn rect(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(&element).copied()
    }

    /// Scroll vertically to `y`.
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll.y = y.max(0.0);
    }

    /// Scroll vertically by `dy`.
    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.scroll.y + dy);
    }

    /// Current vertical scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll.y
    }

    /// Change the window size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Visible root rectangle in document coordinates.
    #[must_use]
    pub fn root(&self) -> Rect {
        Rect {
            origin: self.scroll,
            size: self.size,
        }
    }

    /// Total number of entries delivered through `take_entries`.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Intersection of an attached element with the margin-adjusted root:
    /// `(ratio, is_intersecting)`.
    #[must_use]
    pub fn measure(
        &self,
        element: ElementId,
        root_margin: &RootMargin,
    ) -> Option<(f32, bool)> {
        let rect = self.elements.get(&element)?;
        let root = root_margin.apply(&self.root());
        let Some(overlap) = rect.intersection(&root) else {
            return Some((0.0, false));
        };
        let area = rect.area();
        let ratio = if area > 0.0 {
            (overlap.area() / area).min(1.0)
        } else {
            1.0
        };
        Some((ratio, true))
    }
}

impl Viewport for ScrollViewport {
    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn watch(&mut self, element: ElementId, config: &ObserverConfig) {
        let _ = self.watches.insert(
            element,
            Watch {
                threshold: config.threshold,
                root_margin: config.root_margin,
                last_visible: None,
            },
        );
    }

    fn unwatch(&mut self, element: ElementId) {
        let _ = self.watches.remove(&element);
    }

    fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        let mut ids: Vec<ElementId> = self.watches.keys().copied().collect();
        ids.sort_unstable();

        let mut entries = Vec::new();
        for id in ids {
            let Some(watch) = self.watches.get(&id) else {
                continue;
            };
            let Some((ratio, is_intersecting)) =
                self.measure(id, &watch.root_margin)
            else {
                continue;
            };
            let entry = IntersectionEntry {
                element: id,
                ratio,
                is_intersecting,
            };
            let visible = entry.is_visible(watch.threshold);
            if watch.last_visible == Some(visible) {
                continue;
            }
            if let Some(watch) = self.watches.get_mut(&id) {
                watch.last_visible = Some(visible);
            }
            entries.push(entry);
        }
        self.delivered += entries.len();
        entries
    }

    fn watch_count(&self) -> usize {
        self.watches.len()
    }
}
