//! Difficulty ramp
//!
//! A repeating timer on accumulated play time. Every `interval` seconds it
//! fires once and the run's projectile speed grows by `increment`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    interval: f32,
    increment: f32,
    /// Time since the last firing
    accumulated: f32,
    firings: u32,
}

impl DifficultyRamp {
    pub fn new(interval: f32, increment: f32) -> Self {
        Self {
            interval,
            increment,
            accumulated: 0.0,
            firings: 0,
        }
    }

    /// Feed elapsed play time; returns the speed to add
    ///
    /// A long frame can fire several times at once so the ramp never falls
    /// behind wall-clock time.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.interval <= 0.0 || dt <= 0.0 {
            return 0.0;
        }
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        if fired > 0 {
            self.firings += fired;
            log::trace!("Difficulty ramp fired {fired}x (total {})", self.firings);
        }
        fired as f32 * self.increment
    }

    /// Number of firings so far
    pub fn firings(&self) -> u32 {
        self.firings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut ramp = DifficultyRamp::new(1.0, 0.5);
        let dt = 1.0 / 64.0;
        let mut speed = 7.0;
        for _ in 0..64 * 5 {
            speed += ramp.advance(dt);
        }
        assert_eq!(ramp.firings(), 5);
        assert_eq!(speed, 7.0 + 0.5 * 5.0);
    }

    #[test]
    fn test_variable_frame_rate() {
        let mut ramp = DifficultyRamp::new(1.0, 0.5);
        let mut speed = 7.0;
        // 10 seconds made of a mix of short and long frames
        let pattern = [0.010, 0.033, 0.016, 0.050, 0.091];
        let mut elapsed = 0.0;
        let mut i = 0;
        while elapsed + pattern[i % pattern.len()] <= 10.0 {
            let dt = pattern[i % pattern.len()];
            speed += ramp.advance(dt);
            elapsed += dt;
            i += 1;
        }
        let expected = 7.0 + 0.5 * 10.0;
        assert!((speed - expected).abs() <= 0.5 + f32::EPSILON, "speed {speed}");
    }

    #[test]
    fn test_long_frame_catches_up() {
        let mut ramp = DifficultyRamp::new(1.0, 0.5);
        assert_eq!(ramp.advance(3.25), 1.5);
        assert_eq!(ramp.firings(), 3);
        assert_eq!(ramp.advance(0.75), 0.5);
    }
}
