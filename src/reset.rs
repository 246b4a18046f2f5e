//! Process-wide reset broadcast.
//!
//! The reset channel is the only global state in the crate: one event
//! type with no payload, existing once per page session and never
//! persisted. The navigation layer broadcasts on view changes; every
//! engine subscribes and, on its next frame, returns all of its targets to
//! hidden so revisited views replay their reveals.
//!
//! Broadcasts are counted with a generation number, so any number of
//! broadcasts between two frames collapse into a single reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Broadcast side of the reset channel.
#[derive(Debug, Clone, Default)]
pub struct ResetChannel {
    generation: Arc<AtomicU64>,
}

static GLOBAL: OnceLock<ResetChannel> = OnceLock::new();

impl ResetChannel {
    /// A private channel, isolated from the page-session one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The page-session channel shared by every engine that does not ask
    /// for a private one.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.get_or_init(Self::new).clone()
    }

    /// Ask every subscriber to reset on its next frame.
    pub fn broadcast(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!("reset broadcast (generation {generation})");
    }

    /// Number of broadcasts so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Subscribe. Broadcasts sent before subscribing are not delivered.
    #[must_use]
    pub fn subscribe(&self) -> ResetReceiver {
        ResetReceiver {
            channel: self.clone(),
            seen: self.generation(),
        }
    }
}

/// Receiving side of the reset channel, held by one engine.
#[derive(Debug, Clone)]
pub struct ResetReceiver {
    channel: ResetChannel,
    seen: u64,
}

impl ResetReceiver {
    /// Whether at least one broadcast arrived since the last poll.
    pub fn poll(&mut self) -> bool {
        let current = self.channel.generation();
        if current == self.seen {
            return false;
        }
        self.seen = current;
        true
    }

    /// The channel this receiver listens on.
    #[must_use]
    pub fn channel(&self) -> &ResetChannel {
        &self.channel
    }
}
