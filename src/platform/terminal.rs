//! Terminal input via crossterm
//!
//! Key model: terminals that report key releases hold a key from its press
//! until its release. Other terminals only send a press followed, after the
//! OS repeat delay, by a stream of repeated presses. There a key counts as
//! held while it was seen recently: a long window covers the gap before the
//! first repeat, a short one applies once repeats are flowing.

use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use glam::Vec2;

use super::{InputError, InputSource};
use crate::consts::TARGET_FPS;
use crate::renderer::GridMapping;
use crate::sim::Direction;

/// Frames a key stays held after a repeat
const HOLD_WINDOW: u64 = 4;

/// Longest OS delay before the first auto-repeat we wait out
const FIRST_REPEAT_DELAY: Duration = Duration::from_millis(500);

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// A direction key that is (probably) down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyHold {
    /// Frame of the last press or repeat
    last_seen: u64,
    /// Auto-repeat has started for this hold
    repeating: bool,
}

/// Input source reading crossterm events
#[derive(Debug)]
pub struct TerminalInput {
    mapping: GridMapping,
    /// Held keys, indexed by `Direction::index()`
    keys: [Option<KeyHold>; 4],
    /// The terminal sends release events
    release_events: bool,
    /// Frames a fresh press stays held while waiting for the first repeat
    first_repeat_window: u64,
    frame: u64,
    click_released: bool,
    mouse: Vec2,
    quit: bool,
}

impl TerminalInput {
    /// Input for a terminal without release events running at the default frame rate
    pub fn new(mapping: GridMapping) -> Self {
        Self {
            mapping,
            keys: [None; 4],
            release_events: false,
            first_repeat_window: repeat_window_frames(TARGET_FPS),
            frame: 0,
            click_released: false,
            mouse: Vec2::new(-1.0, -1.0),
            quit: false,
        }
    }

    /// Whether the terminal reports key releases (see [`TerminalGuard::reports_key_release`])
    pub fn with_release_events(mut self, release_events: bool) -> Self {
        self.release_events = release_events;
        self
    }

    /// Size the first-repeat window for the loop's frame rate
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.first_repeat_window = repeat_window_frames(fps);
        self
    }

    /// Apply one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.mapping = GridMapping::new(cols, rows, self.mapping.arena);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) {
        let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
        if (ctrl_c || code == KeyCode::Esc) && kind != KeyEventKind::Release {
            log::info!("Quit requested from terminal");
            self.quit = true;
            return;
        }
        let Some(dir) = direction_for(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // Without release events a repeat arrives as another press
                let repeating = kind == KeyEventKind::Repeat || self.is_key_down(dir);
                self.keys[dir.index()] = Some(KeyHold {
                    last_seen: self.frame,
                    repeating,
                });
            }
            KeyEventKind::Release => {
                self.keys[dir.index()] = None;
            }
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        self.mouse = self.mapping.to_arena(column, row);
        if kind == MouseEventKind::Up(MouseButton::Left) {
            self.click_released = true;
        }
    }

    /// Start a new frame: one-shot state is cleared, holds age by one
    fn begin_frame(&mut self) {
        self.frame += 1;
        self.click_released = false;
    }
}

fn repeat_window_frames(fps: u32) -> u64 {
    let frames = (FIRST_REPEAT_DELAY.as_secs_f32() * fps as f32).ceil() as u64;
    frames.max(HOLD_WINDOW)
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<(), InputError> {
        self.begin_frame();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn is_key_down(&self, dir: Direction) -> bool {
        let Some(hold) = self.keys[dir.index()] else {
            return false;
        };
        if self.release_events {
            return true;
        }
        let window = if hold.repeating {
            HOLD_WINDOW
        } else {
            self.first_repeat_window
        };
        self.frame.saturating_sub(hold.last_seen) <= window
    }

    fn primary_click_released(&self) -> bool {
        self.click_released
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }
}

/// Puts the terminal into game mode and restores it on drop
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(EnableMouseCapture)?;
        out.execute(cursor::Hide)?;
        // Release events where supported; other terminals fall back to the hold window
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        log::debug!("Terminal ready (key release events: {keyboard_enhanced})");
        Ok(Self { keyboard_enhanced })
    }

    /// The terminal will send key release events
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(DisableMouseCapture);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn new_input() -> TerminalInput {
        TerminalInput::new(GridMapping::new(80, 40, Vec2::new(800.0, 800.0)))
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_held_until_release_when_reported() {
        let mut input = new_input().with_release_events(true);
        input.begin_frame();
        input.handle_event(key(KeyCode::Right, KeyEventKind::Press));
        for _ in 0..120 {
            input.begin_frame();
            assert!(input.is_key_down(Direction::Right));
        }
        input.handle_event(key(KeyCode::Right, KeyEventKind::Release));
        assert!(!input.is_key_down(Direction::Right));
    }

    #[test]
    fn test_press_bridges_first_repeat_delay() {
        let mut input = new_input().with_frame_rate(60);
        input.begin_frame();
        input.handle_event(key(KeyCode::Right, KeyEventKind::Press));
        // No events for half a second: the OS has not started repeating yet
        for _ in 0..30 {
            input.begin_frame();
            assert!(input.is_key_down(Direction::Right));
        }
        for _ in 0..HOLD_WINDOW + 1 {
            input.begin_frame();
        }
        assert!(!input.is_key_down(Direction::Right));
    }

    #[test]
    fn test_repeats_use_short_window() {
        let mut input = new_input().with_frame_rate(60);
        input.begin_frame();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press));
        for _ in 0..20 {
            input.begin_frame();
        }
        // Terminals without release events repeat with plain presses
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press));
        for _ in 0..HOLD_WINDOW {
            input.begin_frame();
            assert!(input.is_key_down(Direction::Left));
        }
        input.begin_frame();
        assert!(!input.is_key_down(Direction::Left));
    }

    #[test]
    fn test_window_scales_with_frame_rate() {
        assert_eq!(repeat_window_frames(60), 30);
        assert_eq!(repeat_window_frames(30), 15);
        assert_eq!(repeat_window_frames(1), HOLD_WINDOW);
    }

    #[test]
    fn test_release_clears_immediately() {
        let mut input = new_input();
        input.begin_frame();
        input.handle_event(key(KeyCode::Char('d'), KeyEventKind::Press));
        assert!(input.is_key_down(Direction::Right));
        input.handle_event(key(KeyCode::Char('d'), KeyEventKind::Release));
        assert!(!input.is_key_down(Direction::Right));
    }

    #[test]
    fn test_mouse_release_maps_to_arena() {
        let mut input = new_input();
        input.begin_frame();
        input.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 40,
            row: 32,
            modifiers: KeyModifiers::NONE,
        }));
        assert!(input.primary_click_released());
        assert_eq!(input.mouse_position(), Vec2::new(405.0, 650.0));
        input.begin_frame();
        assert!(!input.primary_click_released());
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut input = new_input();
        input.handle_event(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(input.quit_requested());

        let mut input = new_input();
        input.handle_event(Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }));
        assert!(input.quit_requested());
    }
}
