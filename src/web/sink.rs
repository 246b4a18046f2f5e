use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::viewport::DomViewport;
use crate::driver::style::{BASE_CLASS, REVEALED_CLASS};
use crate::driver::Presentation;
use crate::engine::PresentationSink;
use crate::machine::TrackRole;
use crate::viewport::ElementId;

/// Selector of the marker child (e.g. a timeline dot) inside a group
/// member element.
pub const MARKER_SELECTOR: &str = "[data-reveal-marker]";

/// Writes presentations to DOM elements registered with a [`DomViewport`].
#[derive(Debug)]
pub struct DomSink<'a> {
    viewport: &'a DomViewport,
}

impl<'a> DomSink<'a> {
    /// Sink resolving ids through `viewport`.
    #[must_use]
    pub fn new(viewport: &'a DomViewport) -> Self {
        Self { viewport }
    }

    fn resolve(&self, element: ElementId, role: TrackRole) -> Option<Element> {
        let el = self.viewport.element(element)?;
        match role {
            TrackRole::Primary => Some(el.clone()),
            TrackRole::Marker => el.query_selector(MARKER_SELECTOR).ok().flatten(),
        }
    }
}

impl PresentationSink for DomSink<'_> {
    fn apply(
        &mut self,
        element: ElementId,
        role: TrackRole,
        presentation: &Presentation,
    ) {
        let Some(el) = self.resolve(element, role) else {
            log::debug!("no DOM node for {element} ({role:?})");
            return;
        };

        let classes = el.class_list();
        for class in &presentation.classes {
            let _ = classes.add_1(class);
        }
        let revealed = presentation.classes.contains(&REVEALED_CLASS);
        if classes.contains(BASE_CLASS) {
            let _ = classes.toggle_with_force(REVEALED_CLASS, revealed);
        }

        let Some(style) = presentation.style else {
            return;
        };
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        let decl = html.style();
        let _ = decl.set_property("opacity", &style.opacity.to_string());
        let _ = decl.set_property("transform", &style.transform_css());
    }
}
