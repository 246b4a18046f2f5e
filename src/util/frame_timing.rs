//! Fixed-rate frame clock for driving the engine without a browser.

use web_time::{Duration, Instant};

/// Produces evenly spaced animation-frame timestamps.
///
/// The browser hands `requestAnimationFrame` callbacks a timestamp; the
/// simulator and tests use this clock to produce the same kind of sequence
/// deterministically.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Interval between frames.
    frame_duration: Duration,
    /// Timestamp of the most recent frame.
    now: Instant,
    /// Number of frames produced so far.
    frames: u64,
}

impl FrameClock {
    /// Highest supported frame rate; faster clocks run at this rate.
    pub const MAX_FPS: u32 = 1000;

    /// Create a clock starting at `origin` running at `fps` (0 is treated
    /// as 60, anything above [`MAX_FPS`](Self::MAX_FPS) is capped).
    #[must_use]
    pub fn new(origin: Instant, fps: u32) -> Self {
        let fps = if fps == 0 { 60 } else { fps.min(Self::MAX_FPS) };
        Self {
            frame_duration: Duration::from_nanos(1_000_000_000 / u64::from(fps)),
            now: origin,
            frames: 0,
        }
    }

    /// Timestamp of the current frame.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Number of frames advanced since creation.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Duration of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Advance one frame and return its timestamp.
    pub fn advance(&mut self) -> Instant {
        self.now += self.frame_duration;
        self.frames += 1;
        self.now
    }

    /// Frame timestamps covering `span`, advancing the clock past it.
    pub fn advance_by(&mut self, span: Duration) -> Vec<Instant> {
        let deadline = self.now + span;
        let mut stamps = Vec::new();
        while self.now < deadline {
            stamps.push(self.advance());
        }
        stamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_by_frame_duration() {
        let origin = Instant::now();
        let mut clock = FrameClock::new(origin, 50);
        let t1 = clock.advance();
        assert_eq!(t1 - origin, Duration::from_millis(20));
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn advance_by_covers_span() {
        let origin = Instant::now();
        let mut clock = FrameClock::new(origin, 10);
        let stamps = clock.advance_by(Duration::from_millis(350));
        assert_eq!(stamps.len(), 4);
        assert!(clock.now() >= origin + Duration::from_millis(350));
    }

    #[test]
    fn zero_fps_falls_back_to_sixty() {
        let clock = FrameClock::new(Instant::now(), 0);
        assert_eq!(clock.frame_duration(), Duration::from_nanos(16_666_666));
    }
}
