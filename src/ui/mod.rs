//! Screens and widgets
//!
//! Each screen handler consumes one tick of input and reports the screen the
//! driver should switch to, if any. Layout positions are authored for an
//! 800 px tall arena and scaled to the configured height.

pub mod button;
pub mod howto;
pub mod playing;
pub mod title;

use glam::Vec2;

pub use button::{Button, ButtonState};
pub use howto::HowToScreen;
pub use playing::PlayingScreen;
pub use title::TitleScreen;

/// Height the layout constants are written for
const LAYOUT_HEIGHT: f32 = 800.0;

/// Screen selector returned by screen handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Title,
    /// Start a run; the playing screen stays active under this mode
    NewGame,
    HowTo,
    /// Exit the process
    Quit,
}

/// Horizontally centred point at layout height `y`
pub(crate) fn centered_at(arena: Vec2, y: f32) -> Vec2 {
    Vec2::new(arena.x / 2.0, y * arena.y / LAYOUT_HEIGHT)
}
