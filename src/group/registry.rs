//! Arena of group members indexed by id.

use rustc_hash::FxHashMap;

use super::view::Side;
use crate::machine::RevealMachine;

/// One registered member of a group.
#[derive(Debug)]
pub struct Member {
    /// Caller-assigned id.
    pub id: String,
    /// Insertion-order position, stable for the member's lifetime.
    pub index: usize,
    /// Layout side derived from the index.
    pub side: Side,
    /// The member's reveal state machine.
    pub machine: RevealMachine,
}

/// Members of one group, stored in a slot arena with an id lookup.
///
/// Owned by exactly one [`GroupChoreographer`](super::GroupChoreographer);
/// never shared across groups.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    slots: Vec<Option<Member>>,
    by_id: FxHashMap<String, usize>,
    free: Vec<usize>,
}

impl GroupRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a member. An id that is already registered hands the member
    /// back unchanged.
    pub fn insert(&mut self, member: Member) -> Result<(), Member> {
        if self.by_id.contains_key(&member.id) {
            return Err(member);
        }
        let id = member.id.clone();
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(member);
                slot
            }
            None => {
                self.slots.push(Some(member));
                self.slots.len() - 1
            }
        };
        let _ = self.by_id.insert(id, slot);
        Ok(())
    }

    /// Remove a member by id.
    pub fn remove(&mut self, id: &str) -> Option<Member> {
        let slot = self.by_id.remove(id)?;
        self.free.push(slot);
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Look up a member.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Member> {
        let slot = *self.by_id.get(id)?;
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Look up a member mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Member> {
        let slot = *self.by_id.get(id)?;
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the registry has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Members in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.slots.iter().flatten()
    }

    /// Members in slot order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Member> {
        self.slots.iter_mut().flatten()
    }

    /// Members sorted by group index.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.iter().collect();
        members.sort_by_key(|m| m.index);
        members
    }

    /// Remove every member, returning them.
    pub fn drain(&mut self) -> Vec<Member> {
        self.by_id.clear();
        self.free.clear();
        self.slots.drain(..).flatten().collect()
    }
}
