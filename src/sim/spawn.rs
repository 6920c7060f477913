//! Zone-based enemy spawning driven by scroll progress
//!
//! Each zone is a one-shot latch: it releases its batch the first time the
//! visible window reaches its start, and stays quiet until re-armed.

use rand::Rng;

use super::enemy::Enemy;
use crate::tuning::Tuning;

/// A patrol band that spawns enemies once
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnZone {
    pub x_start: f32,
    pub x_end: f32,
    spawned: bool,
}

impl SpawnZone {
    pub fn new(x_start: f32, x_end: f32) -> Self {
        Self {
            x_start,
            x_end,
            spawned: false,
        }
    }

    #[inline]
    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    /// True while armed and the window's right edge is past the zone start
    #[inline]
    pub fn should_activate(&self, scroll_offset: f32, view_width: f32) -> bool {
        !self.spawned && scroll_offset + view_width > self.x_start
    }

    pub fn rearm(&mut self) {
        self.spawned = false;
    }
}

/// Result of one zone activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub zone: usize,
    pub spawned: u32,
}

/// Owns the zone latches and releases enemies into the world
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    zones: Vec<SpawnZone>,
    min_count: u32,
    max_count: u32,
}

impl SpawnDirector {
    pub fn new(zones: Vec<SpawnZone>, min_count: u32, max_count: u32) -> Self {
        Self {
            zones,
            min_count,
            max_count: max_count.max(min_count),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        let zones = tuning
            .spawn
            .zones
            .iter()
            .map(|z| SpawnZone::new(z.start, z.end))
            .collect();
        Self::new(zones, tuning.spawn.min_count, tuning.spawn.max_count)
    }

    pub fn zones(&self) -> &[SpawnZone] {
        &self.zones
    }

    /// Re-arm every zone latch
    pub fn rearm(&mut self) {
        for zone in &mut self.zones {
            zone.rearm();
        }
    }

    /// Activate every armed zone that has come into view
    pub fn tick(
        &mut self,
        scroll_offset: f32,
        view_width: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
        enemies: &mut Vec<Enemy>,
    ) -> Vec<Activation> {
        let mut activations = Vec::new();
        for (index, zone) in self.zones.iter_mut().enumerate() {
            if !zone.should_activate(scroll_offset, view_width) {
                continue;
            }
            let count = rng.random_range(self.min_count..=self.max_count);
            for _ in 0..count {
                enemies.push(Enemy::spawn_in(zone, tuning, rng));
            }
            zone.spawned = true;
            log::info!(
                "Zone {} [{}, {}) activated with {} enemies",
                index,
                zone.x_start,
                zone.x_end,
                count
            );
            activations.push(Activation {
                zone: index,
                spawned: count,
            });
        }
        activations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zone_activates_when_window_overlaps_start() {
        let zone = SpawnZone::new(1200.0, 1600.0);
        assert!(!zone.should_activate(0.0, 800.0));
        assert!(!zone.should_activate(400.0, 800.0));
        assert!(zone.should_activate(400.5, 800.0));
    }

    #[test]
    fn test_tick_spawns_visible_zones_only() {
        let tuning = Tuning::default();
        let mut director = SpawnDirector::from_tuning(&tuning);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemies = Vec::new();

        let activations = director.tick(0.0, 800.0, &tuning, &mut rng, &mut enemies);
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].zone, 0);
        assert!((1..=3).contains(&enemies.len()));
        assert_eq!(enemies.len() as u32, activations[0].spawned);
        assert!(enemies.iter().all(|e| e.zone_start == 500.0 && e.zone_end == 900.0));
        assert!(director.zones()[0].is_spawned());
        assert!(!director.zones()[1].is_spawned());
    }

    #[test]
    fn test_zone_latch_fires_once() {
        let tuning = Tuning::default();
        let mut director = SpawnDirector::from_tuning(&tuning);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemies = Vec::new();

        director.tick(2000.0, 800.0, &tuning, &mut rng, &mut enemies);
        let after_first = enemies.len();
        assert!(director.zones().iter().all(SpawnZone::is_spawned));

        for _ in 0..50 {
            assert!(director.tick(2000.0, 800.0, &tuning, &mut rng, &mut enemies).is_empty());
        }
        assert_eq!(enemies.len(), after_first);

        director.rearm();
        assert!(director.zones().iter().all(|z| !z.is_spawned()));
        assert_eq!(director.tick(2000.0, 800.0, &tuning, &mut rng, &mut enemies).len(), 3);
    }

    #[test]
    fn test_fixed_count_when_range_collapses() {
        let tuning = Tuning::default();
        let mut director = SpawnDirector::new(vec![SpawnZone::new(100.0, 400.0)], 2, 2);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut enemies = Vec::new();
        director.tick(0.0, 800.0, &tuning, &mut rng, &mut enemies);
        assert_eq!(enemies.len(), 2);
    }
}
