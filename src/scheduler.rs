//! Frame scheduling.
//!
//! The simulation never talks to a display-refresh primitive directly. It
//! hands a tick function to a [`Scheduler`] and the scheduler decides when
//! frames happen. [`FrameScheduler`] is fired by whatever drives the host's
//! refresh (a winit redraw, a test loop) and reads time from a [`Clock`].
//!
//! Stopping is total: once `stop` returns the tick function has been dropped
//! and no later `fire` can reach it.

use std::fmt;

use log::info;

use crate::time::{Clock, Time};

/// Timing handed to the tick function every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Frames fired since the last `start`, counting this one.
    pub frame: u64,
    /// Seconds since the last `start`.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl FrameTime {
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        f64::from(self.elapsed) * 1000.0
    }
}

/// Per-frame callback.
pub type Tick = Box<dyn FnMut(&FrameTime)>;

/// Something that calls a tick function once per frame until stopped.
pub trait Scheduler {
    /// Begin calling `tick` every frame, replacing any previous tick.
    fn start(&mut self, tick: Tick);

    /// Stop calling the tick and drop it. Stopping twice is a no-op.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// A scheduler fired externally, one frame per [`fire`](Self::fire).
pub struct FrameScheduler<C: Clock> {
    clock: C,
    time: Time,
    tick: Option<Tick>,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C) -> Self {
        let time = Time::new(clock.now());
        Self {
            clock,
            time,
            tick: None,
        }
    }

    /// Run one frame. Returns `false`, doing nothing, when stopped.
    pub fn fire(&mut self) -> bool {
        let Some(tick) = self.tick.as_mut() else {
            return false;
        };
        self.time.update(self.clock.now());
        let frame = FrameTime {
            frame: self.time.frame(),
            elapsed: self.time.elapsed(),
            delta: self.time.delta(),
        };
        tick(&frame);
        true
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Scheduler for FrameScheduler<C> {
    fn start(&mut self, tick: Tick) {
        self.time.reset(self.clock.now());
        self.tick = Some(tick);
        info!("Frame loop started");
    }

    fn stop(&mut self) {
        if self.tick.take().is_some() {
            info!("Frame loop stopped after {} frames", self.time.frame());
        }
    }

    fn is_running(&self) -> bool {
        self.tick.is_some()
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for FrameScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("clock", &self.clock)
            .field("time", &self.time)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn recording_tick(log: &Rc<RefCell<Vec<FrameTime>>>) -> Tick {
        let log = Rc::clone(log);
        Box::new(move |frame| log.borrow_mut().push(*frame))
    }

    #[test]
    fn test_fire_before_start_does_nothing() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        assert!(!scheduler.is_running());
        assert!(!scheduler.fire());
    }

    #[test]
    fn test_ticks_follow_the_clock() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.start(recording_tick(&log));

        for _ in 0..3 {
            clock.advance(Duration::from_millis(16));
            assert!(scheduler.fire());
        }

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].frame, 3);
        assert!((log[2].elapsed - 0.048).abs() < 1e-6);
        assert!((log[2].delta - 0.016).abs() < 1e-6);
        assert!((log[2].elapsed_ms() - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_stop_drops_tick() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.start(recording_tick(&log));
        scheduler.fire();

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.fire());
        assert_eq!(log.borrow().len(), 1);
        // The scheduler held the only other reference to the log.
        assert_eq!(Rc::strong_count(&log), 1);
    }

    #[test]
    fn test_restart_resets_timing() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.start(recording_tick(&log));
        clock.advance(Duration::from_secs(1));
        scheduler.fire();

        scheduler.start(recording_tick(&log));
        clock.advance(Duration::from_millis(10));
        scheduler.fire();

        let log = log.borrow();
        assert_eq!(log[1].frame, 1);
        assert!((log[1].elapsed - 0.010).abs() < 1e-6);
    }
}
