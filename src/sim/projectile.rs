//! Straight-line projectiles fired by the player and by enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Who fired a projectile; decides which targets it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Horizontal band of the world in which projectiles stay alive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldWindow {
    pub left: f32,
    pub right: f32,
    /// Extra room past the left edge so shots fired at the edge survive
    pub margin: f32,
}

impl WorldWindow {
    pub fn new(scroll_offset: f32, view_width: f32, margin: f32) -> Self {
        Self {
            left: scroll_offset,
            right: scroll_offset + view_width,
            margin,
        }
    }
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per frame; the sign is the travel direction
    pub speed: f32,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, owner: Owner) -> Self {
        Self {
            pos,
            size,
            speed,
            owner,
        }
    }

    /// Move by `speed * dt` frames
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.speed * dt;
    }

    pub fn is_expired(&self, window: &WorldWindow) -> bool {
        self.pos.x < window.left - window.margin || self.pos.x > window.right
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Advance every projectile, then drop those that left the window
pub fn advance_and_cull(projectiles: &mut Vec<Projectile>, dt: f32, window: &WorldWindow) {
    for p in projectiles.iter_mut() {
        p.advance(dt);
    }
    projectiles.retain(|p| !p.is_expired(window));
}
