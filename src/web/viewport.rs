use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::dom_error;
use crate::error::RevealError;
use crate::observer::ObserverConfig;
use crate::viewport::{ElementId, IntersectionEntry, Viewport};

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// One live `IntersectionObserver` and the callback it holds.
struct Watch {
    observer: IntersectionObserver,
    _callback: EntryCallback,
}

/// Viewport backed by the browser's `IntersectionObserver`.
///
/// Elements are registered once and referred to by [`ElementId`]
/// afterwards. Observer callbacks only queue entries; the engine drains the
/// queue on its next frame.
pub struct DomViewport {
    elements: FxHashMap<ElementId, Element>,
    watches: FxHashMap<ElementId, Watch>,
    queue: Rc<RefCell<Vec<IntersectionEntry>>>,
    next_id: u64,
}

impl DomViewport {
    /// Empty viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: FxHashMap::default(),
            watches: FxHashMap::default(),
            queue: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
        }
    }

    /// Register a DOM element and get its id.
    pub fn register(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let _ = self.elements.insert(id, element);
        id
    }

    /// Forget an element, dropping its watch.
    pub fn forget(&mut self, element: ElementId) -> Option<Element> {
        self.unwatch(element);
        self.elements.remove(&element)
    }

    /// The DOM element behind an id.
    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(&element)
    }

    fn try_watch(
        &mut self,
        id: ElementId,
        config: &ObserverConfig,
    ) -> Result<(), RevealError> {
        let Some(element) = self.elements.get(&id) else {
            return Ok(());
        };
        let queue = Rc::clone(&self.queue);
        let callback: EntryCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let mut queue = queue.borrow_mut();
                for value in entries.iter() {
                    let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>()
                    else {
                        continue;
                    };
                    queue.push(IntersectionEntry {
                        element: id,
                        ratio: entry.intersection_ratio() as f32,
                        is_intersecting: entry.is_intersecting(),
                    });
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&config.root_margin.to_string());
        init.set_threshold(&JsValue::from_f64(f64::from(config.threshold)));
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        )
        .map_err(|e| dom_error("IntersectionObserver", &e))?;
        observer.observe(element);
        let _ = self.watches.insert(
            id,
            Watch {
                observer,
                _callback: callback,
            },
        );
        Ok(())
    }
}

impl Default for DomViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport for DomViewport {
    fn contains(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|el| el.is_connected())
    }

    fn watch(&mut self, element: ElementId, config: &ObserverConfig) {
        self.unwatch(element);
        if let Err(e) = self.try_watch(element, config) {
            log::warn!("watch {element}: {e}");
        }
    }

    fn unwatch(&mut self, element: ElementId) {
        if let Some(watch) = self.watches.remove(&element) {
            watch.observer.disconnect();
        }
    }

    fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    fn watch_count(&self) -> usize {
        self.watches.len()
    }
}

impl std::fmt::Debug for DomViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomViewport")
            .field("elements", &self.elements.len())
            .field("watches", &self.watches.len())
            .finish_non_exhaustive()
    }
}
