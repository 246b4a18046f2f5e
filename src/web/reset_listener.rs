use wasm_bindgen::prelude::*;

use super::dom_error;
use crate::error::RevealError;
use crate::reset::ResetChannel;

/// Window event that triggers a reset broadcast.
pub const RESET_EVENT: &str = "reveal:reset";

/// Forwards [`RESET_EVENT`] from the window to a reset channel. The
/// listener is removed when this value is dropped.
pub struct ResetListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl ResetListener {
    /// Start listening on the current window.
    pub fn install(channel: ResetChannel) -> Result<Self, RevealError> {
        let window = web_sys::window()
            .ok_or_else(|| RevealError::Dom("no global window".to_owned()))?;
        let callback =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                channel.broadcast();
            });
        window
            .add_event_listener_with_callback(
                RESET_EVENT,
                callback.as_ref().unchecked_ref(),
            )
            .map_err(|e| dom_error(RESET_EVENT, &e))?;
        log::debug!("listening for {RESET_EVENT}");
        Ok(Self { window, callback })
    }
}

impl Drop for ResetListener {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            RESET_EVENT,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

impl std::fmt::Debug for ResetListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetListener").finish_non_exhaustive()
    }
}
