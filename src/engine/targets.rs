//! Single-target registration surface for [`RevealEngine`].

use super::{RevealEngine, RevealHandle};
use crate::config::RevealConfig;
use crate::driver::Presentation;
use crate::machine::{RevealMachine, RevealState, TrackRole};
use crate::viewport::{ElementId, Viewport};

impl<V: Viewport> RevealEngine<V> {
    /// Register a target. The configuration is captured now; the target
    /// stays hidden and unobserved until an element is attached.
    pub fn use_reveal(
        &mut self,
        id: impl Into<String>,
        config: RevealConfig,
    ) -> RevealHandle {
        let handle = RevealHandle(self.next_id());
        let machine = RevealMachine::new(id, config, self.driver.clone());
        log::debug!("register target '{}'", machine.id());
        let _ = self.targets.insert(handle, machine);
        handle
    }

    /// Attach the target's element (or detach it with `None`). Returns
    /// `false` for an unknown handle.
    pub fn attach_ref(
        &mut self,
        handle: RevealHandle,
        element: Option<ElementId>,
    ) -> bool {
        let Some(machine) = self.targets.get_mut(&handle) else {
            return false;
        };
        if self.enabled {
            machine.attach(&mut self.viewport, element);
        } else {
            let _ = machine.pin(&mut self.viewport, element);
        }
        true
    }

    /// Whether the target is revealing or revealed.
    #[must_use]
    pub fn is_visible(&self, handle: RevealHandle) -> bool {
        self.targets
            .get(&handle)
            .is_some_and(RevealMachine::is_visible)
    }

    /// Current state of the target.
    #[must_use]
    pub fn state(&self, handle: RevealHandle) -> Option<RevealState> {
        self.targets.get(&handle).map(RevealMachine::state)
    }

    /// What the target's element should look like right now. Available
    /// from registration on, so the initial style can be applied before
    /// first paint.
    #[must_use]
    pub fn presentation(&self, handle: RevealHandle) -> Option<Presentation> {
        self.targets
            .get(&handle)?
            .presentation(TrackRole::Primary)
    }

    /// The target's state machine.
    #[must_use]
    pub fn target(&self, handle: RevealHandle) -> Option<&RevealMachine> {
        self.targets.get(&handle)
    }

    /// Remove the target, cancelling its timers and releasing its watch.
    pub fn unmount(&mut self, handle: RevealHandle) -> bool {
        let Some(mut machine) = self.targets.remove(&handle) else {
            return false;
        };
        machine.teardown(&mut self.viewport);
        log::debug!("unmount target '{}'", machine.id());
        true
    }
}
