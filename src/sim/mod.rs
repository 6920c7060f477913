//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit frame delta only, no wall clock
//! - Seeded RNG only
//! - Stable update order (player, enemies in spawn order, zones)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod stepper;
pub mod tick;

pub use enemy::Enemy;
pub use geometry::{Rect, intersects};
pub use player::{Facing, Player, VerticalState};
pub use projectile::{Owner, Projectile, WorldWindow};
pub use snapshot::{EnemyView, PlayerView, ProjectileView, WorldSnapshot};
pub use spawn::{Activation, SpawnDirector, SpawnZone};
pub use state::{GameEvent, GamePhase, World};
pub use stepper::FixedStepper;
pub use tick::{Action, InputSnapshot, step};
