//! How-to-play screen: static instructions and a way back

use glam::Vec2;

use super::{Button, ScreenMode, centered_at};
use crate::audio::{AudioManager, SoundEffect};
use crate::renderer::{Background, Renderer, Sprite, TextColor, TextStyle};
use crate::sim::{Rect, TickInput};

pub const INSTRUCTIONS: [&str; 8] = [
    "Welcome to Hungry Critter!",
    "The goal is to eat as many berries as you can.",
    "As you collect berries,",
    "balls will be thrown at you.",
    "Avoid being caught.",
    "The longer you survive, the faster they come.",
    "Use the arrow keys to move.",
    "Have fun!",
];

pub struct HowToScreen {
    arena: Vec2,
    back: Button,
}

impl HowToScreen {
    pub fn new(arena: Vec2) -> Self {
        Self {
            arena,
            back: Button::new(
                "Return to main menu",
                centered_at(arena, 650.0),
                40.0,
                ScreenMode::Title,
            ),
        }
    }

    pub fn back_button(&self) -> &Button {
        &self.back
    }

    pub fn update(&mut self, input: &TickInput, audio: &mut AudioManager) -> Option<ScreenMode> {
        let action = self.back.update(input.mouse, input.click_released);
        if action.is_some() {
            audio.play(SoundEffect::Select);
        }
        action
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.clear(Background::Menu);

        let header = centered_at(self.arena, 150.0);
        renderer.draw(
            Sprite::HowToBanner,
            Rect::from_center(header, Vec2::new(self.arena.x * 0.5, 100.0)),
        );
        renderer.draw_text("How To Play", header, TextStyle::new(40.0, TextColor::White).bold());

        let style = TextStyle::new(25.0, TextColor::White);
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            renderer.draw_text(line, centered_at(self.arena, 300.0 + i as f32 * 40.0), style);
        }

        self.back.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogAudio;
    use crate::platform::RecordingRenderer;

    #[test]
    fn test_return_goes_to_title() {
        let mut audio = AudioManager::new(Box::new(LogAudio));
        let mut howto = HowToScreen::new(Vec2::new(800.0, 800.0));
        let center = howto.back_button().center();
        assert_eq!(
            howto.update(&TickInput::click_at(center), &mut audio),
            Some(ScreenMode::Title)
        );
    }

    #[test]
    fn test_other_clicks_stay() {
        let mut audio = AudioManager::new(Box::new(LogAudio));
        let mut howto = HowToScreen::new(Vec2::new(800.0, 800.0));
        assert_eq!(howto.update(&TickInput::click_at(Vec2::new(400.0, 300.0)), &mut audio), None);
        assert_eq!(howto.update(&TickInput::default(), &mut audio), None);
    }

    #[test]
    fn test_draws_every_instruction() {
        let mut renderer = RecordingRenderer::new();
        HowToScreen::new(Vec2::new(800.0, 800.0)).draw(&mut renderer);
        renderer.present().unwrap();
        for line in INSTRUCTIONS {
            assert!(renderer.last_frame_has_text(line), "missing {line:?}");
        }
    }
}
