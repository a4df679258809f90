//! Elapsed-time baseline and frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Default longest single sleep while waiting for a deadline.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Time allotted to one frame at `fps` frames per second, in whole
/// milliseconds (30 fps gives 33 ms).
///
/// # Panics
///
/// Panics if `fps` is 0.
pub fn frame_interval(fps: u32) -> Duration {
    assert!(fps > 0, "target fps must be greater than 0");
    Duration::from_millis(u64::from(1000 / fps))
}

/// Measures time since the last [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct FrameTimer {
    baseline: Instant,
    poll: Duration,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// A timer whose baseline is now.
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    /// A timer that sleeps at most `poll` at a time while waiting.
    pub fn with_poll_interval(poll: Duration) -> Self {
        Self {
            baseline: Instant::now(),
            poll: poll.max(Duration::from_millis(1)),
        }
    }

    /// Move the baseline to now.
    pub fn reset(&mut self) {
        self.baseline = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.baseline.elapsed()
    }

    /// Whole milliseconds since the baseline.
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll
    }

    /// Block until `deadline` has elapsed since the baseline, sleeping in
    /// slices no longer than the poll interval. Returns at once if the
    /// deadline has already passed. Returns how long it waited.
    pub fn wait_until(&self, deadline: Duration) -> Duration {
        let started = Instant::now();
        loop {
            let elapsed = self.elapsed();
            if elapsed >= deadline {
                break;
            }
            thread::sleep((deadline - elapsed).min(self.poll));
        }
        started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(30), Duration::from_millis(33));
        assert_eq!(frame_interval(60), Duration::from_millis(16));
        assert_eq!(frame_interval(1000), Duration::from_millis(1));
        assert_eq!(frame_interval(2000), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "greater than 0")]
    fn test_zero_fps_panics() {
        frame_interval(0);
    }

    #[test]
    fn test_wait_until_reaches_deadline() {
        let timer = FrameTimer::new();
        timer.wait_until(Duration::from_millis(20));
        assert!(timer.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_until_past_deadline_returns_immediately() {
        let timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(15));
        let waited = timer.wait_until(Duration::from_millis(10));
        assert!(waited < Duration::from_millis(5));
    }

    #[test]
    fn test_reset_moves_baseline() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed_millis() >= 10);
        timer.reset();
        assert!(timer.elapsed_millis() < 10);
    }

    #[test]
    fn test_poll_interval_has_floor() {
        assert_eq!(
            FrameTimer::with_poll_interval(Duration::ZERO).poll_interval(),
            Duration::from_millis(1)
        );
    }
}
