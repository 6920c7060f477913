//! Read-only view of the world for renderers and the HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Facing;
use super::projectile::Owner;
use super::state::{GameEvent, GamePhase, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub grounded: bool,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: Owner,
}

/// Everything needed to draw a frame, positions in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub scroll_offset: f32,
    pub time_ticks: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    /// Player shots first, then each enemy's shots in enemy order
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<GameEvent>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let player = &world.player;
        let projectiles = player
            .projectiles
            .iter()
            .chain(world.enemies.iter().flat_map(|e| e.projectiles.iter()))
            .map(|p| ProjectileView {
                pos: p.pos,
                size: p.size,
                owner: p.owner,
            })
            .collect();

        Self {
            phase: world.phase,
            score: world.score,
            level: world.level,
            scroll_offset: world.scroll_offset,
            time_ticks: world.time_ticks,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                health: player.health,
                grounded: player.is_grounded(),
                facing: player.facing,
            },
            enemies: world
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: e.size,
                    direction: e.direction,
                })
                .collect(),
            projectiles,
            events: world.events.clone(),
        }
    }

    /// Convert a world-space x to a screen-space x
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.scroll_offset
    }

    pub fn projectiles_of(&self, owner: Owner) -> impl Iterator<Item = &ProjectileView> {
        self.projectiles.iter().filter(move |p| p.owner == owner)
    }
}
