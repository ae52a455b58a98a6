//! Terminal back-end
//!
//! The arena is stretched over the whole character grid. A frame is composed
//! into a cell buffer and written out in one go on `present`.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{Background, RenderError, Renderer, Sprite, TextColor, TextStyle};
use crate::sim::{CollectibleKind, ProjectileKind, Rect};

/// Walk cycle glyphs, indexed by `Direction::index()` then frame
const WALK_GLYPHS: [[char; 2]; 4] = [['^', 'A'], ['v', 'V'], ['<', '{'], ['>', '}']];

/// Conversion between arena coordinates and terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    pub cols: u16,
    pub rows: u16,
    pub arena: Vec2,
}

impl GridMapping {
    pub fn new(cols: u16, rows: u16, arena: Vec2) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            arena,
        }
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.arena.x / f32::from(self.cols),
            self.arena.y / f32::from(self.rows),
        )
    }

    /// Cell containing an arena point (may be off-grid)
    pub fn to_cell(&self, point: Vec2) -> (i32, i32) {
        let cell = self.cell_size();
        (
            (point.x / cell.x).floor() as i32,
            (point.y / cell.y).floor() as i32,
        )
    }

    /// Arena point at the centre of a cell
    pub fn to_arena(&self, col: u16, row: u16) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new(
            (f32::from(col) + 0.5) * cell.x,
            (f32::from(row) + 0.5) * cell.y,
        )
    }

    /// Inclusive cell span covered by `rect`, clipped to the grid
    fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let cell = self.cell_size();
        let c0 = (rect.left() / cell.x).floor().max(0.0);
        let r0 = (rect.top() / cell.y).floor().max(0.0);
        let c1 = ((rect.right() / cell.x).ceil() - 1.0).min(f32::from(self.cols) - 1.0);
        let r1 = ((rect.bottom() / cell.y).ceil() - 1.0).min(f32::from(self.rows) - 1.0);
        if c1 < c0 || r1 < r0 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg,
            bold: false,
        }
    }
}

fn sprite_look(sprite: Sprite) -> (char, Color) {
    match sprite {
        Sprite::PlayerIdle => ('@', Color::Yellow),
        Sprite::PlayerWalk { facing, frame } => {
            let frames = WALK_GLYPHS[facing.index()];
            (frames[usize::from(frame) % frames.len()], Color::Yellow)
        }
        Sprite::PlayerCaught => ('X', Color::DarkYellow),
        Sprite::Collectible(kind) => {
            let color = match kind {
                CollectibleKind::Red => Color::Red,
                CollectibleKind::Blue => Color::Blue,
                CollectibleKind::Pink => Color::Magenta,
                CollectibleKind::White => Color::White,
                CollectibleKind::Yellow => Color::DarkYellow,
            };
            ('o', color)
        }
        Sprite::Projectile(kind) => {
            let color = match kind {
                ProjectileKind::Classic | ProjectileKind::Premier => Color::Red,
                ProjectileKind::Great | ProjectileKind::Net => Color::Blue,
                ProjectileKind::Ultra | ProjectileKind::Timer => Color::DarkGrey,
                ProjectileKind::Quick | ProjectileKind::Moon => Color::Cyan,
                ProjectileKind::Love => Color::Magenta,
                ProjectileKind::Master => Color::DarkMagenta,
            };
            ('O', color)
        }
        Sprite::TitleBanner | Sprite::HowToBanner => ('=', Color::DarkCyan),
    }
}

fn text_color(color: TextColor) -> Color {
    match color {
        TextColor::White => Color::White,
        TextColor::Black => Color::Black,
        TextColor::Highlight => Color::Rgb {
            r: 0xff,
            g: 0xfc,
            b: 0xa7,
        },
    }
}

/// Renderer writing to a terminal (or any `Write`)
pub struct TerminalRenderer<W: Write> {
    out: W,
    mapping: GridMapping,
    background: Color,
    cells: Vec<Cell>,
    /// Re-query the terminal size at the start of every frame
    follow_terminal: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, arena: Vec2) -> Self {
        let mapping = GridMapping::new(cols, rows, arena);
        let background = Color::Black;
        let cells = vec![
            Cell::blank(background);
            usize::from(mapping.cols) * usize::from(mapping.rows)
        ];
        Self {
            out,
            mapping,
            background,
            cells,
            follow_terminal: false,
        }
    }

    /// Renderer sized to the current terminal that tracks later resizes
    pub fn for_terminal(out: W, arena: Vec2) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::new(out, cols, rows, arena);
        renderer.follow_terminal = true;
        Ok(renderer)
    }

    pub fn mapping(&self) -> GridMapping {
        self.mapping
    }

    /// Follow a terminal resize; the next frame is drawn at the new size
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.mapping = GridMapping::new(cols, rows, self.mapping.arena);
        self.cells = vec![
            Cell::blank(self.background);
            usize::from(self.mapping.cols) * usize::from(self.mapping.rows)
        ];
        log::info!("Terminal resized to {cols}x{rows}");
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color, bold: bool) {
        let in_grid = (0..i32::from(self.mapping.cols)).contains(&col)
            && (0..i32::from(self.mapping.rows)).contains(&row);
        if !in_grid {
            return;
        }
        let idx = row as usize * usize::from(self.mapping.cols) + col as usize;
        let cell = &mut self.cells[idx];
        cell.ch = ch;
        cell.fg = fg;
        cell.bold = bold;
    }

    /// Text of one row of the composed frame (for tests and debugging)
    pub fn row_text(&self, row: u16) -> String {
        let cols = usize::from(self.mapping.cols);
        let start = usize::from(row) * cols;
        self.cells[start..start + cols].iter().map(|c| c.ch).collect()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, background: Background) {
        if self.follow_terminal {
            if let Ok((cols, rows)) = terminal::size() {
                if (cols, rows) != (self.mapping.cols, self.mapping.rows) {
                    self.resize(cols, rows);
                }
            }
        }
        self.background = match background {
            Background::Menu => Color::DarkBlue,
            Background::Arena => Color::DarkGreen,
        };
        let blank = Cell::blank(self.background);
        self.cells.iter_mut().for_each(|c| *c = blank);
    }

    fn draw(&mut self, sprite: Sprite, rect: Rect) {
        let Some((c0, r0, c1, r1)) = self.mapping.span(&rect) else {
            return;
        };
        let (ch, fg) = sprite_look(sprite);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(i32::from(col), i32::from(row), ch, fg, false);
            }
        }
    }

    fn draw_text(&mut self, text: &str, center: Vec2, style: TextStyle) {
        let (col, row) = self.mapping.to_cell(center);
        let len = text.chars().count() as i32;
        let start = col - len / 2;
        let fg = text_color(style.color);
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, fg, style.bold);
        }
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let cols = usize::from(self.mapping.cols);
        let mut last: Option<(Color, Color, bool)> = None;
        for (row, line) in self.cells.chunks(cols).enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                let look = (cell.fg, cell.bg, cell.bold);
                if last != Some(look) {
                    self.out.queue(style::SetAttribute(Attribute::Reset))?;
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                    self.out.queue(style::SetBackgroundColor(cell.bg))?;
                    if cell.bold {
                        self.out.queue(style::SetAttribute(Attribute::Bold))?;
                    }
                    last = Some(look);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
