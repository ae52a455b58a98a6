//! Title screen: scores and the main menu

use glam::Vec2;

use super::{Button, ScreenMode, centered_at};
use crate::audio::{AudioManager, SoundEffect};
use crate::renderer::{Background, Renderer, Sprite, TextColor, TextStyle};
use crate::score::ScoreState;
use crate::sim::{Rect, TickInput};

const BUTTON_FONT: f32 = 40.0;
const SCORE_FONT: f32 = 30.0;

pub struct TitleScreen {
    arena: Vec2,
    buttons: [Button; 3],
}

impl TitleScreen {
    pub fn new(arena: Vec2) -> Self {
        Self {
            arena,
            buttons: [
                Button::new("Start", centered_at(arena, 450.0), BUTTON_FONT, ScreenMode::NewGame),
                Button::new(
                    "How To Play",
                    centered_at(arena, 550.0),
                    BUTTON_FONT,
                    ScreenMode::HowTo,
                ),
                Button::new("Quit", centered_at(arena, 650.0), BUTTON_FONT, ScreenMode::Quit),
            ],
        }
    }

    /// The button leading to `action`
    pub fn button(&self, action: ScreenMode) -> Option<&Button> {
        self.buttons.iter().find(|b| b.action() == action)
    }

    /// Update button states; a click on one returns its action
    pub fn update(&mut self, input: &TickInput, audio: &mut AudioManager) -> Option<ScreenMode> {
        for button in &mut self.buttons {
            if let Some(action) = button.update(input.mouse, input.click_released) {
                audio.play(SoundEffect::Select);
                return Some(action);
            }
        }
        None
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, scores: &ScoreState) {
        renderer.clear(Background::Menu);

        let banner_center = centered_at(self.arena, 150.0);
        renderer.draw(
            Sprite::TitleBanner,
            Rect::from_center(banner_center, Vec2::new(self.arena.x * 0.6, 120.0)),
        );
        renderer.draw_text(
            "Hungry Critter",
            banner_center,
            TextStyle::new(48.0, TextColor::White).bold(),
        );

        let score_style = TextStyle::new(SCORE_FONT, TextColor::White).bold();
        renderer.draw_text(
            &format!("High Score: {}", scores.high),
            centered_at(self.arena, 300.0),
            score_style,
        );
        renderer.draw_text(
            &format!("Last Score: {}", scores.last),
            centered_at(self.arena, 350.0),
            score_style,
        );

        for button in &self.buttons {
            button.draw(renderer);
        }
    }
}
