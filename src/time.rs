//! Time facilities for frame timing.
//!
//! A [`Clock`] says what time it is; [`Time`] turns successive readings into
//! elapsed time, delta time, a frame counter and an FPS estimate. The
//! [`SystemClock`] follows the wall clock, the [`ManualClock`] only moves
//! when told to, which makes frame sequences deterministic in tests.
//!
//! # Example
//!
//! ```ignore
//! use ballpit::time::{Clock, SystemClock, Time};
//!
//! let clock = SystemClock::new();
//! let mut time = Time::new(clock.now());
//!
//! // Once per frame:
//! time.update(clock.now());
//! println!("Elapsed: {:.2}s, frame {}", time.elapsed(), time.frame());
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source, measured from an arbitrary fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only advances when told to.
///
/// Clones share the same reading, so a test can keep one handle and give the
/// other to a scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Timing state for one run of frames.
#[derive(Debug, Clone)]
pub struct Time {
    /// Clock reading when timing started.
    start: Duration,
    /// Clock reading at the last frame.
    last_frame: Duration,
    /// Total elapsed time in seconds (cached for fast access).
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Clock reading at the last FPS calculation.
    fps_update_time: Duration,
    /// How often to update the FPS calculation.
    fps_update_interval: Duration,
}

impl Time {
    /// Start timing from the clock reading `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame at clock reading `now`.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience. A reading that
    /// goes backwards counts as zero delta.
    pub fn update(&mut self, now: Duration) -> (f32, f32) {
        self.delta_secs = now.saturating_sub(self.last_frame).as_secs_f32();
        self.last_frame = self.last_frame.max(now);
        self.elapsed_secs = self.last_frame.saturating_sub(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = self.last_frame.saturating_sub(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = self.last_frame;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames recorded since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Restart timing from `now`.
    pub fn reset(&mut self, now: Duration) {
        *self = Self::new(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new(Duration::ZERO);
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_time_update() {
        let clock = ManualClock::new();
        let mut time = Time::new(clock.now());
        clock.advance(Duration::from_millis(10));
        let (elapsed, delta) = time.update(clock.now());

        assert!((elapsed - 0.010).abs() < 1e-6);
        assert!((delta - 0.010).abs() < 1e-6);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fps_estimate() {
        let clock = ManualClock::new();
        let mut time = Time::new(clock.now());
        for _ in 0..60 {
            clock.advance(Duration::from_micros(16_667));
            time.update(clock.now());
        }
        assert!((time.fps() - 60.0).abs() < 1.0);
    }

    #[test]
    fn test_backwards_reading_is_zero_delta() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(2));
        let mut time = Time::new(clock.now());
        clock.set(Duration::from_secs(1));
        let (elapsed, delta) = time.update(clock.now());
        assert_eq!(delta, 0.0);
        assert_eq!(elapsed, 0.0);
    }

    #[test]
    fn test_manual_clock_clones_share_reading() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
