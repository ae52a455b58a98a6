//! Clickable text button
//!
//! A button has two looks. The state is picked once per tick from the
//! pointer position, and hit testing uses the rectangle of the look chosen
//! on the previous tick, so a highlighted button grabs a slightly larger area.

use glam::Vec2;

use super::ScreenMode;
use crate::renderer::{Renderer, TextColor, TextStyle, text_size};
use crate::sim::Rect;

/// Font scale of the highlighted look
const HIGHLIGHT_SCALE: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Highlighted,
}

#[derive(Debug, Clone)]
pub struct Button {
    label: &'static str,
    center: Vec2,
    font_size: f32,
    action: ScreenMode,
    state: ButtonState,
}

impl Button {
    pub fn new(label: &'static str, center: Vec2, font_size: f32, action: ScreenMode) -> Self {
        Self {
            label,
            center,
            font_size,
            action,
            state: ButtonState::Normal,
        }
    }

    pub fn action(&self) -> ScreenMode {
        self.action
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    fn style(&self, state: ButtonState) -> TextStyle {
        match state {
            ButtonState::Normal => TextStyle::new(self.font_size, TextColor::White),
            ButtonState::Highlighted => {
                TextStyle::new(self.font_size * HIGHLIGHT_SCALE, TextColor::Highlight).bold()
            }
        }
    }

    /// Area covered by the button in the given state
    pub fn rect_for(&self, state: ButtonState) -> Rect {
        Rect::from_center(self.center, text_size(self.label, self.style(state).size))
    }

    /// Area covered right now
    pub fn rect(&self) -> Rect {
        self.rect_for(self.state)
    }

    /// Pick this tick's state; returns the action when clicked
    pub fn update(&mut self, mouse: Vec2, click_released: bool) -> Option<ScreenMode> {
        if self.rect().contains_point(mouse) {
            self.state = ButtonState::Highlighted;
            if click_released {
                return Some(self.action);
            }
        } else {
            self.state = ButtonState::Normal;
        }
        None
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw_text(self.label, self.center, self.style(self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quit_button() -> Button {
        Button::new("Quit", Vec2::new(400.0, 650.0), 40.0, ScreenMode::Quit)
    }

    #[test]
    fn test_hover_highlights() {
        let mut button = quit_button();
        assert_eq!(button.update(Vec2::new(400.0, 650.0), false), None);
        assert_eq!(button.state(), ButtonState::Highlighted);
        button.update(Vec2::new(0.0, 0.0), false);
        assert_eq!(button.state(), ButtonState::Normal);
    }

    #[test]
    fn test_click_inside_returns_action() {
        let mut button = quit_button();
        assert_eq!(button.update(Vec2::new(400.0, 650.0), true), Some(ScreenMode::Quit));
    }

    #[test]
    fn test_click_outside_does_nothing() {
        let mut button = quit_button();
        assert_eq!(button.update(Vec2::new(400.0, 700.0), true), None);
    }

    #[test]
    fn test_highlighted_rect_is_larger() {
        let button = quit_button();
        let normal = button.rect_for(ButtonState::Normal);
        let big = button.rect_for(ButtonState::Highlighted);
        assert!(big.size.x > normal.size.x && big.size.y > normal.size.y);
        assert_eq!(big.center(), normal.center());
    }

    #[test]
    fn test_hit_test_uses_previous_state() {
        let mut button = quit_button();
        // Just outside the normal rect but inside the highlighted one
        let normal = button.rect_for(ButtonState::Normal);
        let edge = Vec2::new(normal.right() + 5.0, 650.0);
        assert_eq!(button.update(edge, false), None);
        assert_eq!(button.state(), ButtonState::Normal);

        button.update(Vec2::new(400.0, 650.0), false);
        assert_eq!(button.update(edge, true), Some(ScreenMode::Quit));
    }
}
