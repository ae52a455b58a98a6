//! Platform abstraction layer
//!
//! Collaborators the game loop needs from its host:
//! - Input polling (`InputSource`)
//! - Time/ticks (`Clock`)
//!
//! `terminal` backs them with crossterm, `headless` with scripts for tests
//! and demos, `time` provides the clocks.

pub mod headless;
pub mod terminal;
pub mod time;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{Direction, TickInput};

pub use headless::{RecordedAudio, RecordingRenderer, ScriptedInput};
pub use terminal::{TerminalGuard, TerminalInput};
pub use time::{FrameClock, ManualClock};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read terminal events: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of player input, sampled once per tick
pub trait InputSource {
    /// Collect everything that happened since the previous poll
    fn poll(&mut self) -> Result<(), InputError>;
    /// The host asked the process to exit
    fn quit_requested(&self) -> bool;
    fn is_key_down(&self, dir: Direction) -> bool;
    /// Primary button went up since the previous poll
    fn primary_click_released(&self) -> bool;
    /// Pointer position in arena coordinates
    fn mouse_position(&self) -> Vec2;

    /// Freeze the current input into a tick snapshot
    fn snapshot(&self) -> TickInput {
        let mut held = [false; 4];
        for dir in Direction::ALL {
            held[dir.index()] = self.is_key_down(dir);
        }
        TickInput {
            held,
            click_released: self.primary_click_released(),
            mouse: self.mouse_position(),
            quit: self.quit_requested(),
        }
    }
}

/// Frame timing
pub trait Clock {
    /// Time since the previous call (first call: since the clock was created)
    fn elapsed_since_last_tick(&mut self) -> std::time::Duration;
    /// Block until the current frame has lasted `1 / target_fps`
    fn sleep_until_next_tick(&mut self, target_fps: u32);
}
