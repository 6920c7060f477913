//! Game balance and world layout
//!
//! Every value has a default, so a JSON file only needs to name the fields it
//! overrides.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Visible window and ground placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    pub width: f32,
    pub height: f32,
    /// Gap between the ground line and the bottom edge
    pub ground_margin: f32,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            ground_margin: GROUND_MARGIN,
        }
    }
}

impl ViewportTuning {
    /// World y of the ground surface (y grows downward)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_margin
    }

    /// Screen x past which the world scrolls instead of the player
    #[inline]
    pub fn midline(&self) -> f32 {
        self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn_x: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal units per frame
    pub speed: f32,
    /// Upward velocity applied on jump
    pub jump_force: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    pub max_health: u32,
    /// Frames that must elapse between shots
    pub fire_cooldown: f32,
    pub shot_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_x: PLAYER_SPAWN_X,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: GRAVITY,
            max_health: PLAYER_HEALTH,
            fire_cooldown: PLAYER_FIRE_COOLDOWN,
            shot_speed: PLAYER_SHOT_SPEED,
        }
    }
}

/// Half-open range of whole frames, sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownRange {
    pub min: u32,
    pub max: u32,
}

impl CooldownRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a cooldown in frames. A degenerate range always yields `min`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max) as f32
        } else {
            self.min as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Horizontal distance within which an enemy opens fire
    pub detection_radius: f32,
    pub initial_cooldown: CooldownRange,
    pub cooldown: CooldownRange,
    pub shot_speed: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: ENEMY_SPEED,
            detection_radius: ENEMY_DETECTION_RADIUS,
            initial_cooldown: CooldownRange::new(ENEMY_INITIAL_COOLDOWN.0, ENEMY_INITIAL_COOLDOWN.1),
            cooldown: CooldownRange::new(ENEMY_COOLDOWN.0, ENEMY_COOLDOWN.1),
            shot_speed: ENEMY_SHOT_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: f32,
    pub height: f32,
    pub cull_margin: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: PROJECTILE_SIZE,
            height: PROJECTILE_SIZE,
            cull_margin: PROJECTILE_CULL_MARGIN,
        }
    }
}

/// A patrol band in world x, as written in tuning files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneTuning {
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub zones: Vec<ZoneTuning>,
    pub min_count: u32,
    pub max_count: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            zones: SPAWN_ZONES
                .iter()
                .map(|&(start, end)| ZoneTuning { start, end })
                .collect(),
            min_count: SPAWN_MIN_COUNT,
            max_count: SPAWN_MAX_COUNT,
        }
    }
}

/// Complete constant set for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport: ViewportTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
    pub score_per_kill: u64,
    pub score_per_level: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: ViewportTuning::default(),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
            spawn: SpawnTuning::default(),
            score_per_kill: SCORE_PER_KILL,
            score_per_level: SCORE_PER_LEVEL,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

impl Tuning {
    /// Same tuning with no spawn zones (useful for hand-placed scenarios)
    pub fn without_zones(mut self) -> Self {
        self.spawn.zones.clear();
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        if !(self.viewport.ground_margin >= 0.0 && self.viewport.ground_margin < self.viewport.height) {
            return Err(TuningError::Invalid {
                field: "viewport.ground_margin",
                reason: "must lie within the viewport height".into(),
            });
        }

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.speed", self.player.speed)?;
        positive("player.jump_force", self.player.jump_force)?;
        positive("player.gravity", self.player.gravity)?;
        positive("player.shot_speed", self.player.shot_speed)?;
        if self.player.max_health == 0 {
            return Err(TuningError::Invalid {
                field: "player.max_health",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.player.fire_cooldown >= 0.0) {
            return Err(TuningError::Invalid {
                field: "player.fire_cooldown",
                reason: "must not be negative".into(),
            });
        }

        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;
        positive("enemy.speed", self.enemy.speed)?;
        positive("enemy.shot_speed", self.enemy.shot_speed)?;
        if !(self.enemy.detection_radius >= 0.0) {
            return Err(TuningError::Invalid {
                field: "enemy.detection_radius",
                reason: "must not be negative".into(),
            });
        }
        for (field, range) in [
            ("enemy.initial_cooldown", self.enemy.initial_cooldown),
            ("enemy.cooldown", self.enemy.cooldown),
        ] {
            if range.min > range.max {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("min {} exceeds max {}", range.min, range.max),
                });
            }
        }

        positive("projectile.width", self.projectile.width)?;
        positive("projectile.height", self.projectile.height)?;
        // Enemies may fire from behind the left edge while the player is in range
        if !(self.projectile.cull_margin >= self.enemy.detection_radius) {
            return Err(TuningError::Invalid {
                field: "projectile.cull_margin",
                reason: format!(
                    "must be at least the enemy detection radius ({})",
                    self.enemy.detection_radius
                ),
            });
        }

        if self.spawn.min_count > self.spawn.max_count {
            return Err(TuningError::Invalid {
                field: "spawn.min_count",
                reason: format!(
                    "{} exceeds max_count {}",
                    self.spawn.min_count, self.spawn.max_count
                ),
            });
        }
        for zone in &self.spawn.zones {
            if !(zone.end - zone.start >= self.enemy.width) {
                return Err(TuningError::Invalid {
                    field: "spawn.zones",
                    reason: format!(
                        "zone [{}, {}) is narrower than an enemy ({})",
                        zone.start, zone.end, self.enemy.width
                    ),
                });
            }
        }

        if self.score_per_level == 0 {
            return Err(TuningError::Invalid {
                field: "score_per_level",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.viewport.ground_line(), 430.0);
        assert_eq!(tuning.spawn.zones.len(), 3);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "player": { "speed": 7.5 }, "score_per_kill": 25 }"#)
            .expect("valid json");
        assert_eq!(tuning.player.speed, 7.5);
        assert_eq!(tuning.player.jump_force, PLAYER_JUMP_FORCE);
        assert_eq!(tuning.score_per_kill, 25);
        assert_eq!(tuning.enemy, EnemyTuning::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Tuning::from_json(r#"{ "player": { "speed": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player.speed", .. }));

        let err = Tuning::from_json(r#"{ "spawn": { "zones": [{ "start": 10, "end": 20 }] } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn.zones", .. }));

        let err = Tuning::from_json(r#"{ "spawn": { "min_count": 4, "max_count": 2 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn.min_count", .. }));

        let err = Tuning::from_json(r#"{ "score_per_level": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "score_per_level", .. }));
    }

    #[test]
    fn test_cull_margin_covers_detection_radius() {
        let tuning = Tuning::default();
        assert!(tuning.projectile.cull_margin >= tuning.enemy.detection_radius);

        let err = Tuning::from_json(r#"{ "projectile": { "cull_margin": 50 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "projectile.cull_margin", .. }));

        let err = Tuning::from_json(r#"{ "enemy": { "detection_radius": 400 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "projectile.cull_margin", .. }));

        let tuning = Tuning::from_json(
            r#"{ "enemy": { "detection_radius": 400 }, "projectile": { "cull_margin": 400 } }"#,
        )
        .expect("margin matches radius");
        assert_eq!(tuning.projectile.cull_margin, 400.0);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert_eq!(Tuning::load_or_default("/definitely/not/here.json"), Tuning::default());
    }

    #[test]
    fn test_cooldown_sampling_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let range = CooldownRange::new(50, 200);
        for _ in 0..500 {
            let c = range.sample(&mut rng);
            assert!((50.0..200.0).contains(&c));
            assert_eq!(c.fract(), 0.0);
        }
        assert_eq!(CooldownRange::new(80, 80).sample(&mut rng), 80.0);
    }
}
