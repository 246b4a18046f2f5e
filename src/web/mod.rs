//! Browser bindings (feature `web`).
//!
//! [`DomViewport`] implements [`Viewport`](crate::viewport::Viewport) with
//! one `IntersectionObserver` per watched element, [`DomSink`] writes
//! presentations back to the DOM, and [`ResetListener`] forwards the
//! `reveal:reset` window event to the reset channel.

mod reset_listener;
mod sink;
mod viewport;

pub use reset_listener::{ResetListener, RESET_EVENT};
pub use sink::{DomSink, MARKER_SELECTOR};
pub use viewport::DomViewport;
use wasm_bindgen::JsValue;

use crate::error::RevealError;

/// Route `log` output to the browser console and install the panic hook.
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

pub(crate) fn dom_error(context: &str, value: &JsValue) -> RevealError {
    RevealError::Dom(format!("{context}: {value:?}"))
}
