//! Route-change transition.
//!
//! The router collaborator calls [`Navigator::navigate`] on every view
//! change. The navigator broadcasts on the reset channel so the next view's
//! reveals replay, then holds a short loading state before the new route
//! is shown.

use web_time::{Duration, Instant};

use crate::reset::ResetChannel;

/// Emitted by [`Navigator::tick`] when the loading state ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The new route may now be rendered.
    Ready {
        /// Route that finished loading.
        route: String,
    },
}

/// Tracks the current route and the loading beat after a change.
#[derive(Debug)]
pub struct Navigator {
    channel: ResetChannel,
    loading_delay: Duration,
    current: Option<String>,
    loading: Option<(String, Instant)>,
}

impl Navigator {
    /// Navigator broadcasting on `channel`.
    #[must_use]
    pub fn new(channel: ResetChannel, loading_delay: Duration) -> Self {
        Self {
            channel,
            loading_delay,
            current: None,
            loading: None,
        }
    }

    /// Start a transition to `route`. Navigating again while loading
    /// restarts the loading beat for the newer route.
    pub fn navigate(&mut self, route: impl Into<String>, now: Instant) {
        let route = route.into();
        log::info!("navigate -> {route}");
        self.channel.broadcast();
        self.loading = Some((route, now + self.loading_delay));
    }

    /// Finish the loading beat once its delay has passed.
    pub fn tick(&mut self, now: Instant) -> Option<NavigationEvent> {
        let (_, ready_at) = self.loading.as_ref()?;
        if now < *ready_at {
            return None;
        }
        let (route, _) = self.loading.take()?;
        self.current = Some(route.clone());
        Some(NavigationEvent::Ready { route })
    }

    /// Whether a route change is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Route currently shown, if any.
    #[must_use]
    pub fn current_route(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Route being loaded, if any.
    #[must_use]
    pub fn pending_route(&self) -> Option<&str> {
        self.loading.as_ref().map(|(route, _)| route.as_str())
    }

    /// Loading beat length.
    #[must_use]
    pub fn loading_delay(&self) -> Duration {
        self.loading_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn navigate_broadcasts_and_waits() {
        let channel = ResetChannel::new();
        let mut rx = channel.subscribe();
        let mut nav = Navigator::new(channel, ms(500));
        let t0 = Instant::now();

        nav.navigate("/projects", t0);
        assert!(rx.poll());
        assert!(nav.is_loading());
        assert_eq!(nav.pending_route(), Some("/projects"));
        assert!(nav.tick(t0 + ms(499)).is_none());

        let ready = nav.tick(t0 + ms(500)).unwrap();
        assert_eq!(
            ready,
            NavigationEvent::Ready {
                route: "/projects".to_owned()
            }
        );
        assert!(!nav.is_loading());
        assert_eq!(nav.current_route(), Some("/projects"));
        assert!(nav.tick(t0 + ms(900)).is_none());
    }

    #[test]
    fn renavigating_restarts_the_beat() {
        let mut nav = Navigator::new(ResetChannel::new(), ms(500));
        let t0 = Instant::now();
        nav.navigate("/a", t0);
        nav.navigate("/b", t0 + ms(300));
        assert!(nav.tick(t0 + ms(600)).is_none());
        let ready = nav.tick(t0 + ms(800)).unwrap();
        assert_eq!(ready, NavigationEvent::Ready { route: "/b".to_owned() });
        assert_eq!(nav.current_route(), Some("/b"));
    }

    #[test]
    fn zero_delay_is_ready_next_tick() {
        let mut nav = Navigator::new(ResetChannel::new(), Duration::ZERO);
        let t0 = Instant::now();
        nav.navigate("/", t0);
        assert!(nav.tick(t0).is_some());
    }
}
