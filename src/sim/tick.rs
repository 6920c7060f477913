//! Simulation step
//!
//! One call advances the world by `dt_frames` reference frames. Update order
//! is fixed (player, enemies in spawn order, zones, level) so replays with
//! the same seed and inputs are identical.

use serde::{Deserialize, Serialize};

use super::projectile::WorldWindow;
use super::snapshot::WorldSnapshot;
use super::state::{GameEvent, GamePhase, World};
use crate::consts::MAX_DT_FRAMES;

/// Logical actions, independent of physical keys or touch zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Fire,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::MoveLeft, Action::MoveRight, Action::Jump, Action::Fire];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Jump => "jump",
            Action::Fire => "fire",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "move_left" | "moveleft" | "left" => Some(Action::MoveLeft),
            "move_right" | "moveright" | "right" => Some(Action::MoveRight),
            "jump" => Some(Action::Jump),
            "fire" | "shoot" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Actions held during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
}

impl InputSnapshot {
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        actions.into_iter().fold(Self::default(), Self::with)
    }

    /// Build from action names; unknown names are ignored
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_actions(names.into_iter().filter_map(Action::from_name))
    }

    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.move_left = held,
            Action::MoveRight => self.move_right = held,
            Action::Jump => self.jump = held,
            Action::Fire => self.fire = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
            Action::Fire => self.fire,
        }
    }
}

impl World {
    /// See [`step`]
    pub fn step(&mut self, input: &InputSnapshot, dt_frames: f32) -> WorldSnapshot {
        step(self, input, dt_frames)
    }
}

/// Advance the world by `dt_frames` reference frames.
///
/// Outside `Playing` this is a no-op that returns the current snapshot.
pub fn step(world: &mut World, input: &InputSnapshot, dt_frames: f32) -> WorldSnapshot {
    if world.phase != GamePhase::Playing {
        return world.snapshot();
    }

    let dt = sanitize_dt(dt_frames);
    world.events.clear();
    world.clock += dt;
    world.time_ticks += 1;

    update_player(world, input, dt);
    update_enemies(world, dt);
    if world.player.is_alive() {
        world.activate_zones();
    }
    recompute_level(world);

    if !world.player.is_alive() {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver { score: world.score });
        log::info!(
            "Game over at tick {} with score {} (level {})",
            world.time_ticks,
            world.score,
            world.level
        );
    }

    world.snapshot()
}

fn sanitize_dt(dt_frames: f32) -> f32 {
    if !dt_frames.is_finite() || dt_frames < 0.0 {
        log::warn!("Ignoring invalid frame delta {dt_frames}");
        0.0
    } else if dt_frames > MAX_DT_FRAMES {
        log::warn!("Clamping frame delta {dt_frames} to {MAX_DT_FRAMES}");
        MAX_DT_FRAMES
    } else {
        dt_frames
    }
}

fn update_player(world: &mut World, input: &InputSnapshot, dt: f32) {
    let World {
        tuning,
        player,
        enemies,
        scroll_offset,
        score,
        clock,
        events,
        ..
    } = world;

    player.apply_movement(input.move_left, input.move_right, dt, tuning, scroll_offset);
    player.apply_gravity(dt, tuning);
    player.try_jump(input.jump, tuning);
    if let Some(pos) = player.try_fire(input.fire, *clock, tuning) {
        events.push(GameEvent::PlayerShot { x: pos.x, y: pos.y });
    }

    let window = WorldWindow::new(
        *scroll_offset,
        tuning.viewport.width,
        tuning.projectile.cull_margin,
    );
    for pos in player.resolve_shots(enemies, dt, &window) {
        *score += tuning.score_per_kill;
        log::debug!("Enemy destroyed at ({}, {}), score {}", pos.x, pos.y, score);
        events.push(GameEvent::EnemyKilled { x: pos.x, y: pos.y });
    }
}

fn update_enemies(world: &mut World, dt: f32) {
    let window = world.window();
    let World {
        tuning,
        rng,
        player,
        enemies,
        events,
        ..
    } = world;

    for enemy in enemies.iter_mut() {
        if !player.is_alive() {
            break;
        }
        enemy.patrol(dt);
        if let Some(pos) = enemy.try_fire(player.rect(), tuning, rng) {
            events.push(GameEvent::EnemyShot { x: pos.x, y: pos.y });
        }
        enemy.tick_cooldown(dt);

        let hits = enemy.resolve_shots(player, dt, &window);
        if hits > 0 {
            log::debug!("Player hit {} time(s), health {}", hits, player.health);
            events.push(GameEvent::PlayerHit {
                damage: hits,
                health: player.health,
            });
        }
    }
}

/// Level follows score but never goes down
fn recompute_level(world: &mut World) {
    let Some(completed) = world.score.checked_div(world.tuning.score_per_level) else {
        return;
    };
    let derived = u32::try_from(completed + 1).unwrap_or(u32::MAX);
    if derived > world.level {
        world.level = derived;
        world.events.push(GameEvent::LevelUp { level: derived });
        log::info!("Level up: {}", derived);
    }
}
