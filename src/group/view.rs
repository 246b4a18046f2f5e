//! Render-facing snapshot of a group.

use web_time::Duration;

use crate::driver::{AnimationKind, Presentation};
use crate::machine::RevealState;

/// Which side of a two-column layout (e.g. a vertical timeline) a member
/// sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Even indices.
    Left,
    /// Odd indices.
    Right,
}

impl Side {
    /// Alternate by index: even → left, odd → right.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Slide direction that enters from this side.
    #[must_use]
    pub fn entrance(self) -> AnimationKind {
        match self {
            Self::Left => AnimationKind::SlideLeft,
            Self::Right => AnimationKind::SlideRight,
        }
    }
}

/// Snapshot of one member for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    /// Caller-assigned id.
    pub id: String,
    /// Insertion-order position.
    pub index: usize,
    /// Layout side.
    pub side: Side,
    /// Reveal state.
    pub state: RevealState,
    /// Start delay of the primary track.
    pub delay: Duration,
    /// Presentation of the member element.
    pub presentation: Presentation,
    /// Presentation of the member's marker, when the group uses markers.
    pub marker: Option<Presentation>,
}

/// What a group renders.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupView {
    /// The group has no items; render this message instead of an empty
    /// animated region.
    Placeholder(String),
    /// Members ordered by index.
    Members(Vec<MemberView>),
}

impl GroupView {
    /// Whether this is the empty-group placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Member snapshots; empty for the placeholder.
    #[must_use]
    pub fn members(&self) -> &[MemberView] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Members(members) => members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_by_index() {
        let sides: Vec<_> = (0..3).map(Side::from_index).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
        assert_eq!(Side::Right.entrance(), AnimationKind::SlideRight);
    }

    #[test]
    fn placeholder_has_no_members() {
        let view = GroupView::Placeholder("No entries yet.".to_owned());
        assert!(view.is_placeholder());
        assert!(view.members().is_empty());
    }
}
