//! Run and Gun - a side-scrolling shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input bindings live outside this crate. They feed an
//! [`sim::InputSnapshot`] into [`sim::step`] and draw the returned
//! [`sim::WorldSnapshot`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Rates are expressed per reference frame (1/60 s). The simulation scales
/// them by the `dt_frames` passed to each step.
pub mod consts {
    /// Length of one reference frame in seconds
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta a single step accepts
    pub const MAX_DT_FRAMES: f32 = 4.0;

    /// Viewport dimensions (world units)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 450.0;
    /// Distance from the bottom of the viewport to the ground line
    pub const GROUND_MARGIN: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_FORCE: f32 = 12.0;
    pub const GRAVITY: f32 = 0.6;
    pub const PLAYER_HEALTH: u32 = 3;
    /// 300 ms at 60 Hz
    pub const PLAYER_FIRE_COOLDOWN: f32 = 18.0;
    pub const PLAYER_SHOT_SPEED: f32 = 8.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_DETECTION_RADIUS: f32 = 250.0;
    pub const ENEMY_SHOT_SPEED: f32 = 5.0;
    /// First shot delay range in frames [min, max)
    pub const ENEMY_INITIAL_COOLDOWN: (u32, u32) = (50, 150);
    /// Re-arm delay range in frames [min, max)
    pub const ENEMY_COOLDOWN: (u32, u32) = (50, 200);

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 8.0;
    /// How far behind the left window edge a projectile may travel before culling.
    /// Covers enemies firing from behind the window within detection range.
    pub const PROJECTILE_CULL_MARGIN: f32 = ENEMY_DETECTION_RADIUS;

    /// Scoring
    pub const SCORE_PER_KILL: u64 = 10;
    pub const SCORE_PER_LEVEL: u64 = 100;

    /// Enemies spawned per zone activation (inclusive)
    pub const SPAWN_MIN_COUNT: u32 = 1;
    pub const SPAWN_MAX_COUNT: u32 = 3;
    /// Patrol zones as [start, end) world x ranges
    pub const SPAWN_ZONES: [(f32, f32); 3] = [(500.0, 900.0), (1200.0, 1600.0), (2000.0, 2500.0)];
}
