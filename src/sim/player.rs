//! The player actor: walking, scrolling, jumping and shooting
//!
//! The world step calls these rules in a fixed order each frame:
//! movement and scroll, gravity, jump, fire, then shot resolution.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::geometry::{Rect, intersects};
use super::projectile::{Owner, Projectile, WorldWindow, advance_and_cull};
use crate::tuning::Tuning;

/// Vertical motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalState {
    Grounded,
    Airborne,
}

/// Horizontal facing; decides which side shots leave from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is downward)
    pub vy: f32,
    pub vertical: VerticalState,
    pub facing: Facing,
    pub health: u32,
    /// World clock (frames) of the last shot
    pub last_shot: Option<f32>,
    pub projectiles: Vec<Projectile>,
    /// Jump input as seen on the previous frame, for edge detection
    jump_held: bool,
}

impl Player {
    /// Fresh player standing on the ground at the spawn point
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player.width, tuning.player.height);
        Self {
            pos: Vec2::new(tuning.player.spawn_x, tuning.viewport.ground_line() - size.y),
            size,
            vy: 0.0,
            vertical: VerticalState::Grounded,
            facing: Facing::Right,
            health: tuning.player.max_health,
            last_shot: None,
            projectiles: Vec::new(),
            jump_held: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Walk left/right and push the scroll offset when crossing the midline.
    ///
    /// The player never walks off the left edge of the visible window, and the
    /// scroll offset never moves backward.
    pub fn apply_movement(
        &mut self,
        left: bool,
        right: bool,
        dt: f32,
        tuning: &Tuning,
        scroll_offset: &mut f32,
    ) {
        let delta = tuning.player.speed * dt;
        if left {
            self.pos.x -= delta;
            self.facing = Facing::Left;
        }
        if right {
            self.pos.x += delta;
            self.facing = Facing::Right;
        }

        let overshoot = self.pos.x - *scroll_offset - tuning.viewport.midline();
        if right && overshoot > 0.0 {
            *scroll_offset += overshoot;
        }
        self.pos.x = self.pos.x.max(*scroll_offset);
    }

    /// Integrate gravity and land on the ground line
    pub fn apply_gravity(&mut self, dt: f32, tuning: &Tuning) {
        self.vy += tuning.player.gravity * dt;
        self.pos.y += self.vy * dt;

        let floor = tuning.viewport.ground_line() - self.size.y;
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vy = 0.0;
            self.vertical = VerticalState::Grounded;
        }
    }

    /// Start a jump on the frame the button goes down, if standing.
    /// Returns true when a jump began.
    pub fn try_jump(&mut self, jump: bool, tuning: &Tuning) -> bool {
        let pressed = jump && !self.jump_held;
        self.jump_held = jump;

        if pressed && self.is_grounded() {
            self.vy = -tuning.player.jump_force;
            self.vertical = VerticalState::Airborne;
            return true;
        }
        false
    }

    /// Fire from the leading edge if the cooldown has elapsed.
    /// Returns the spawn position of the new projectile.
    pub fn try_fire(&mut self, fire: bool, clock: f32, tuning: &Tuning) -> Option<Vec2> {
        if !fire {
            return None;
        }
        let ready = self
            .last_shot
            .is_none_or(|t| clock - t > tuning.player.fire_cooldown);
        if !ready {
            return None;
        }

        let size = Vec2::new(tuning.projectile.width, tuning.projectile.height);
        let x = match self.facing {
            Facing::Right => self.pos.x + self.size.x,
            Facing::Left => self.pos.x - size.x,
        };
        let pos = Vec2::new(x, self.pos.y + self.size.y / 2.0);
        self.projectiles.push(Projectile::new(
            pos,
            size,
            self.facing.sign() * tuning.player.shot_speed,
            Owner::Player,
        ));
        self.last_shot = Some(clock);
        Some(pos)
    }

    /// Move shots, cull escaped ones, and destroy the first enemy each shot
    /// touches. Returns the positions of destroyed enemies.
    pub fn resolve_shots(
        &mut self,
        enemies: &mut Vec<Enemy>,
        dt: f32,
        window: &WorldWindow,
    ) -> Vec<Vec2> {
        advance_and_cull(&mut self.projectiles, dt, window);

        let mut killed = Vec::new();
        self.projectiles.retain(|shot| {
            let hit = enemies.iter().position(|e| intersects(shot.rect(), e.rect()));
            match hit {
                Some(i) => {
                    killed.push(enemies.remove(i).pos);
                    false
                }
                None => true,
            }
        });
        killed
    }

    /// Lose one health point (never below zero).
    /// Returns true if this hit emptied the health bar.
    pub fn take_hit(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(1);
        was_alive && !self.is_alive()
    }
}
