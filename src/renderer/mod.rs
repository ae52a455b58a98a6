//! Rendering collaborator
//!
//! The game never touches pixels. Screens describe a frame as sprites and
//! text placed in arena coordinates, and a [`Renderer`] back-end turns that
//! into output. `terminal` draws onto a crossterm character grid.

pub mod terminal;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{CollectibleKind, Direction, PlayerPose, ProjectileKind, Rect};

pub use terminal::{GridMapping, TerminalRenderer};

/// Monospace glyph width as a fraction of the font size
pub const GLYPH_WIDTH_RATIO: f32 = 0.6;
/// Line height as a fraction of the font size
pub const LINE_HEIGHT_RATIO: f32 = 1.1;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Image handles the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    PlayerIdle,
    PlayerWalk { facing: Direction, frame: u8 },
    PlayerCaught,
    Collectible(CollectibleKind),
    Projectile(ProjectileKind),
    TitleBanner,
    HowToBanner,
}

impl Sprite {
    pub fn player(pose: PlayerPose) -> Self {
        match pose {
            PlayerPose::Idle => Sprite::PlayerIdle,
            PlayerPose::Walk { facing, frame } => Sprite::PlayerWalk { facing, frame },
            PlayerPose::Caught => Sprite::PlayerCaught,
        }
    }
}

/// Full-screen backdrops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Title and how-to screens
    Menu,
    /// The playing field
    Arena,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Black,
    /// Pale yellow used for highlighted buttons
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: TextColor,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(size: f32, color: TextColor) -> Self {
        Self {
            size,
            color,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Size of a single line of text at `font_size`
pub fn text_size(text: &str, font_size: f32) -> Vec2 {
    let chars = text.chars().count() as f32;
    Vec2::new(
        chars * font_size * GLYPH_WIDTH_RATIO,
        font_size * LINE_HEIGHT_RATIO,
    )
}

/// Drawing back-end
pub trait Renderer {
    /// Start a frame on the given backdrop
    fn clear(&mut self, background: Background);
    /// Draw a sprite stretched over `rect`
    fn draw(&mut self, sprite: Sprite, rect: Rect);
    /// Draw one line of text centred on `center`
    fn draw_text(&mut self, text: &str, center: Vec2, style: TextStyle);
    /// Show the finished frame
    fn present(&mut self) -> Result<(), RenderError>;
}
