//! Frame pacing and delta-time
//!
//! [`Clock`] is the only place the program blocks: it sleeps out the rest of
//! each frame budget and reports how long the frame really took.
//! [`FixedStep`] turns those variable deltas into fixed simulation steps.

use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock source the [`Clock`] reads and sleeps on
pub trait TimeSource {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Real time
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Paces frames to a target rate and yields capped delta-time in seconds
#[derive(Debug)]
pub struct Clock<T: TimeSource = WallClock> {
    time: T,
    frame_budget: Duration,
    max_delta: f32,
    last: Instant,
}

impl Clock<WallClock> {
    pub fn new(target_hz: u32, max_delta: f32) -> Self {
        Self::with_source(WallClock, target_hz, max_delta)
    }
}

impl<T: TimeSource> Clock<T> {
    /// `target_hz` of zero disables pacing
    pub fn with_source(time: T, target_hz: u32, max_delta: f32) -> Self {
        let frame_budget = if target_hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / target_hz as f64)
        };
        let last = time.now();
        Self {
            time,
            frame_budget,
            max_delta,
            last,
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Wait out the current frame, then return seconds since the previous
    /// tick (or since construction), capped at `max_delta`.
    pub fn tick(&mut self) -> f32 {
        self.tick_raw().min(self.max_delta)
    }

    /// Like [`Clock::tick`] but without the `max_delta` cap. For callers that
    /// bound catch-up themselves, such as a [`FixedStep`] with a substep cap.
    pub fn tick_raw(&mut self) -> f32 {
        let spent = self.time.now().saturating_duration_since(self.last);
        if spent < self.frame_budget {
            self.time.sleep(self.frame_budget - spent);
        }

        let now = self.time.now();
        let elapsed = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        elapsed
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Bank `dt` and return how many fixed steps to run now.
    ///
    /// Time beyond `max_substeps` steps is dropped so a long stall cannot
    /// snowball into ever longer frames.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.step;
        }
        substeps
    }

    /// Unsimulated time carried into the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }
}
