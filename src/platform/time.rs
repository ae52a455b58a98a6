//! Clocks
//!
//! `FrameClock` follows the wall clock and caps the frame rate.
//! `ManualClock` advances by a fixed step per tick and never sleeps.

use std::time::{Duration, Instant};

use super::Clock;

/// Wall-clock frame limiter
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn elapsed_since_last_tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }

    fn sleep_until_next_tick(&mut self, target_fps: u32) {
        if target_fps == 0 {
            return;
        }
        let frame = Duration::from_secs(1) / target_fps;
        let spent = self.last_tick.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }
    }
}

/// Deterministic clock for tests and replays
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: Duration,
    ticks: u64,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        Self { step, ticks: 0 }
    }

    /// Clock stepping exactly one frame at `fps`
    pub fn at_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    /// Ticks handed out so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time handed out so far
    pub fn elapsed(&self) -> Duration {
        self.step * self.ticks as u32
    }
}

impl Clock for ManualClock {
    fn elapsed_since_last_tick(&mut self) -> Duration {
        self.ticks += 1;
        self.step
    }

    fn sleep_until_next_tick(&mut self, _target_fps: u32) {}
}
