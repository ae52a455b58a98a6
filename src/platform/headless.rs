//! Headless collaborators
//!
//! Scripted input, a renderer that records draw calls and an audio sink that
//! records triggers. Used by the test-suite and the `--headless` demo run.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;

use super::{InputError, InputSource};
use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::{Background, RenderError, Renderer, Sprite, TextStyle};
use crate::sim::{Direction, Rect, TickInput};

/// Input replayed from a queue, one entry per poll
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    current: TickInput,
    /// Report a quit once the script runs dry
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            current: TickInput::default(),
            quit_when_done: false,
        }
    }

    /// Ask to quit after the last scripted tick
    pub fn then_quit(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    /// Queue more ticks
    pub fn push(&mut self, input: TickInput) {
        self.script.push_back(input);
    }

    /// Queue `count` ticks of the same input
    pub fn repeat(&mut self, input: TickInput, count: usize) {
        self.script.extend(std::iter::repeat_n(input, count));
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<(), InputError> {
        self.current = match self.script.pop_front() {
            Some(input) => input,
            None => TickInput {
                // Pointer stays where it was last seen
                mouse: self.current.mouse,
                quit: self.quit_when_done,
                ..Default::default()
            },
        };
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.current.quit
    }

    fn is_key_down(&self, dir: Direction) -> bool {
        self.current.is_held(dir)
    }

    fn primary_click_released(&self) -> bool {
        self.current.click_released
    }

    fn mouse_position(&self) -> Vec2 {
        self.current.mouse
    }
}

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Background),
    Sprite(Sprite, Rect),
    Text(String, Vec2, TextStyle),
}

/// Renderer that keeps the draw calls of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the last presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Number of presented frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the last frame drew `text` anywhere
    pub fn last_frame_has_text(&self, text: &str) -> bool {
        self.last_frame
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::Text(t, _, _) if t == text))
    }

    /// Sprites of the last frame, in draw order
    pub fn last_frame_sprites(&self) -> Vec<(Sprite, Rect)> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite(sprite, rect) => Some((*sprite, *rect)),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, background: Background) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(background));
    }

    fn draw(&mut self, sprite: Sprite, rect: Rect) {
        self.pending.push(DrawCommand::Sprite(sprite, rect));
    }

    fn draw_text(&mut self, text: &str, center: Vec2, style: TextStyle) {
        self.pending
            .push(DrawCommand::Text(text.to_string(), center, style));
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}

/// Audio sink recording every trigger; clones share the same log
#[derive(Debug, Default, Clone)]
pub struct RecordedAudio {
    played: Rc<RefCell<Vec<SoundEffect>>>,
}

impl RecordedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.borrow().clone()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.borrow().iter().filter(|e| **e == effect).count()
    }
}

impl AudioSink for RecordedAudio {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.played.borrow_mut().push(effect);
    }
}
