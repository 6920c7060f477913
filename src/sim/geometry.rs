//! Axis-aligned rectangles and overlap testing
//!
//! Coordinates are world space with y growing downward; `pos` is the top-left
//! corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Strict overlap test. Boxes that only share an edge do not intersect.
#[inline]
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
