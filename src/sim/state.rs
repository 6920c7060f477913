//! World state and the run state machine
//!
//! Everything one run mutates lives in [`World`]. Collaborators never touch
//! it directly; they read the [`WorldSnapshot`] produced after each step.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::WorldWindow;
use super::snapshot::WorldSnapshot;
use super::spawn::SpawnDirector;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Health ran out; waits for start or reset
    GameOver,
}

/// Something noteworthy that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot { x: f32, y: f32 },
    EnemyShot { x: f32, y: f32 },
    EnemyKilled { x: f32, y: f32 },
    PlayerHit { damage: u32, health: u32 },
    ZoneActivated { zone: usize, enemies: u32 },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Distance the view has scrolled right; never decreases within a run
    pub scroll_offset: f32,
    pub score: u64,
    pub level: u32,
    /// Elapsed simulated frames in this run
    pub clock: f32,
    /// Steps simulated in this run
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub spawner: SpawnDirector,
    /// Events raised by the most recent step that ran
    pub events: Vec<GameEvent>,
}

impl World {
    /// New world with the default tuning, waiting on the start screen
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// New world with custom tuning. Invalid tuning is logged and replaced
    /// by the defaults.
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Tuning::default()
            }
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            scroll_offset: 0.0,
            score: 0,
            level: 1,
            clock: 0.0,
            time_ticks: 0,
            player: Player::new(&tuning),
            enemies: Vec::new(),
            spawner: SpawnDirector::from_tuning(&tuning),
            events: Vec::new(),
            tuning,
        }
    }

    /// Begin a run from the title or game-over screen
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.reinitialize();
                self.phase = GamePhase::Playing;
                log::info!("Run started (seed {})", self.seed);
            }
            phase => log::debug!("start ignored in {:?}", phase),
        }
    }

    /// Freeze the simulation; takes effect on the next step
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::debug!("Paused at tick {}", self.time_ticks);
        } else {
            log::debug!("pause ignored in {:?}", self.phase);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::debug!("Resumed at tick {}", self.time_ticks);
        } else {
            log::debug!("resume ignored in {:?}", self.phase);
        }
    }

    /// Flip between Playing and Paused (the pause key)
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            phase => log::debug!("toggle_pause ignored in {:?}", phase),
        }
    }

    /// Restart the run from any phase
    pub fn reset(&mut self) {
        self.reinitialize();
        self.phase = GamePhase::Playing;
        log::info!("Run reset");
    }

    /// Fresh player, zeroed progress, re-armed zones. Zones already in view
    /// are populated straight away. The RNG stream continues so consecutive
    /// runs differ.
    fn reinitialize(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.spawner.rearm();
        self.scroll_offset = 0.0;
        self.score = 0;
        self.level = 1;
        self.clock = 0.0;
        self.time_ticks = 0;
        self.events.clear();
        self.activate_zones();
    }

    /// Spawn enemies for every zone that just came into view
    pub(crate) fn activate_zones(&mut self) {
        let activations = self.spawner.tick(
            self.scroll_offset,
            self.tuning.viewport.width,
            &self.tuning,
            &mut self.rng,
            &mut self.enemies,
        );
        for activation in activations {
            self.events.push(GameEvent::ZoneActivated {
                zone: activation.zone,
                enemies: activation.spawned,
            });
        }
    }

    /// Horizontal band where projectiles stay alive
    pub fn window(&self) -> WorldWindow {
        WorldWindow::new(
            self.scroll_offset,
            self.tuning.viewport.width,
            self.tuning.projectile.cull_margin,
        )
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_world_waits_on_start() {
        let world = World::new(1);
        assert_eq!(world.phase, GamePhase::Start);
        assert_eq!(world.level, 1);
        assert_eq!(world.player.health, 3);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_phase_transitions() {
        let mut world = World::new(1);
        world.pause();
        assert_eq!(world.phase, GamePhase::Start);
        world.resume();
        assert_eq!(world.phase, GamePhase::Start);

        world.start();
        assert_eq!(world.phase, GamePhase::Playing);
        world.pause();
        assert_eq!(world.phase, GamePhase::Paused);
        world.start();
        assert_eq!(world.phase, GamePhase::Paused);
        world.resume();
        assert_eq!(world.phase, GamePhase::Playing);

        world.toggle_pause();
        assert_eq!(world.phase, GamePhase::Paused);
        world.toggle_pause();
        assert_eq!(world.phase, GamePhase::Playing);

        world.phase = GamePhase::GameOver;
        world.toggle_pause();
        assert_eq!(world.phase, GamePhase::GameOver);
        world.start();
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut world = World::new(9);
        world.start();
        world.score = 120;
        world.level = 2;
        world.scroll_offset = 900.0;
        world.player.health = 0;
        world.player.pos = Vec2::new(1300.0, 200.0);
        world.phase = GamePhase::GameOver;
        world.activate_zones();
        assert!(world.enemies.iter().any(|e| e.zone_start == 1200.0));

        world.reset();
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.player.health, 3);
        assert_eq!(world.player.pos, Vec2::new(100.0, 380.0));
        assert_eq!(world.score, 0);
        assert_eq!(world.level, 1);
        assert_eq!(world.scroll_offset, 0.0);
        assert!(world.player.projectiles.is_empty());
        // Only the zone in view at scroll 0 is repopulated
        assert!(!world.enemies.is_empty());
        assert!(world.enemies.iter().all(|e| e.zone_start == 500.0));
        let spawned: Vec<bool> = world.spawner.zones().iter().map(|z| z.is_spawned()).collect();
        assert_eq!(spawned, vec![true, false, false]);
    }

    #[test]
    fn test_start_populates_visible_zone() {
        let mut world = World::new(3);
        assert!(world.enemies.is_empty());

        world.start();
        let snap = world.snapshot();
        assert!(!snap.enemies.is_empty());
        assert!(snap.enemies.iter().all(|e| e.pos.x >= 500.0 && e.pos.x + e.size.x <= 900.0));
        assert!(snap.events.iter().any(|e| matches!(
            e,
            GameEvent::ZoneActivated { zone: 0, enemies } if *enemies as usize == snap.enemies.len()
        )));
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let mut tuning = Tuning::default();
        tuning.score_per_level = 0;
        let world = World::with_tuning(tuning, 1);
        assert_eq!(world.tuning, Tuning::default());
    }
}
