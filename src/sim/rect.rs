//! Axis-aligned rectangle geometry for sprites and UI elements
//!
//! Screen space: origin at the top-left of the arena, x grows right, y grows down.
//! A rectangle covers `[left, right) x [top, bottom)`, so two rectangles that
//! only share an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Move the rectangle so its centre lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.min = center - self.size / 2.0;
    }

    /// Translate in place
    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
    }

    /// Copy translated by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            size: self.size,
        }
    }

    /// Point-in-rectangle test (half-open on the right/bottom edges)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Whether this rectangle lies entirely inside `bounds` (edges may touch)
    pub fn is_within(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left()
            && self.right() <= bounds.right()
            && self.top() >= bounds.top()
            && self.bottom() <= bounds.bottom()
    }
}
