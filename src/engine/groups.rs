//! Group registration surface for [`RevealEngine`].

use super::{GroupHandle, RevealEngine};
use crate::group::{
    GroupChoreographer, GroupConfig, GroupItem, GroupView, SyncReport,
};
use crate::viewport::{ElementId, Viewport};

impl<V: Viewport> RevealEngine<V> {
    /// Register a group and its initial items. An empty item list is
    /// valid: the group renders its placeholder and watches nothing.
    pub fn use_group_reveal<I: GroupItem>(
        &mut self,
        items: &[I],
        config: GroupConfig,
    ) -> GroupHandle {
        let handle = GroupHandle(self.next_id());
        let mut group = GroupChoreographer::new(config, self.driver.clone());
        let _ = group.sync_items(&mut self.viewport, items);
        log::debug!("register {handle} with {} members", group.len());
        let _ = self.groups.insert(handle, group);
        handle
    }

    /// Replace the group's item list. New ids are registered after the
    /// existing members; missing ids are disposed and removed.
    pub fn update_group_items<I: GroupItem>(
        &mut self,
        handle: GroupHandle,
        items: &[I],
    ) -> Option<SyncReport> {
        let group = self.groups.get_mut(&handle)?;
        Some(group.sync_items(&mut self.viewport, items))
    }

    /// Attach (or detach) the element rendered for member `id`. Returns
    /// `false` for an unknown group or id.
    pub fn attach_ref_for_id(
        &mut self,
        handle: GroupHandle,
        id: &str,
        element: Option<ElementId>,
    ) -> bool {
        let Some(group) = self.groups.get_mut(&handle) else {
            return false;
        };
        if self.enabled {
            return group.attach_ref_for_id(&mut self.viewport, id, element);
        }
        group.pin_ref_for_id(&mut self.viewport, id, element)
    }

    /// Snapshot of the group for rendering.
    #[must_use]
    pub fn render_group(&self, handle: GroupHandle) -> Option<GroupView> {
        self.groups.get(&handle).map(GroupChoreographer::render)
    }

    /// The group's choreographer.
    #[must_use]
    pub fn group(&self, handle: GroupHandle) -> Option<&GroupChoreographer> {
        self.groups.get(&handle)
    }

    /// Remove the group, tearing down every member.
    pub fn unmount_group(&mut self, handle: GroupHandle) -> bool {
        let Some(mut group) = self.groups.remove(&handle) else {
            return false;
        };
        group.unmount(&mut self.viewport);
        log::debug!("unmount {handle}");
        true
    }
}
