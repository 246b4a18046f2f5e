//! Reveal states and the transition records the machine emits.

use std::fmt;

/// Lifecycle state of one reveal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealState {
    /// Initial styles applied; waiting to enter the viewport.
    #[default]
    Hidden,
    /// Triggered: start delay pending or animation in flight.
    Revealing,
    /// Final styles applied.
    Revealed,
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Revealing => "revealing",
            Self::Revealed => "revealed",
        })
    }
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// The target entered the viewport.
    Entered,
    /// The target left the viewport (repeating targets only).
    Exited,
    /// Every animation track finished.
    Completed,
    /// A reset broadcast arrived.
    Reset,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entered => "entered",
            Self::Exited => "exited",
            Self::Completed => "completed",
            Self::Reset => "reset",
        })
    }
}

/// A state change of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTransition {
    /// Target id.
    pub id: String,
    /// State before the change.
    pub from: RevealState,
    /// State after the change.
    pub to: RevealState,
    /// Trigger of the change.
    pub cause: Cause,
}

impl fmt::Display for RevealTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {} ({})", self.id, self.from, self.to, self.cause)
    }
}

/// Which part of a target an animation track moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackRole {
    /// The element itself (card, section, heading, ...).
    Primary,
    /// A dependent marker animated ahead of the primary track, such as a
    /// timeline dot.
    Marker,
}
