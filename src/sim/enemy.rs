//! Patrol-and-shoot enemies bound to a spawn zone

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, intersects};
use super::player::Player;
use super::projectile::{Owner, Projectile, WorldWindow, advance_and_cull};
use super::spawn::SpawnZone;
use crate::tuning::Tuning;

/// An enemy patrolling its zone
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Patrol band [zone_start, zone_end) copied from the spawning zone
    pub zone_start: f32,
    pub zone_end: f32,
    /// +1 walking right, -1 walking left
    pub direction: f32,
    pub speed: f32,
    /// Frames until the next shot is allowed
    pub cooldown: f32,
    pub projectiles: Vec<Projectile>,
}

impl Enemy {
    /// Enemy standing on the ground at `x`, walking right
    pub fn new(zone: &SpawnZone, x: f32, cooldown: f32, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.enemy.width, tuning.enemy.height);
        Self {
            pos: Vec2::new(x, tuning.viewport.ground_line() - size.y),
            size,
            zone_start: zone.x_start,
            zone_end: zone.x_end,
            direction: 1.0,
            speed: tuning.enemy.speed,
            cooldown,
            projectiles: Vec::new(),
        }
    }

    /// Enemy at a random spot inside the zone with a random first-shot delay
    pub fn spawn_in(zone: &SpawnZone, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let room = zone.x_end - zone.x_start - tuning.enemy.width;
        let x = if room > 0.0 {
            zone.x_start + rng.random_range(0.0..room)
        } else {
            zone.x_start
        };
        let cooldown = tuning.enemy.initial_cooldown.sample(rng);
        Self::new(zone, x, cooldown, tuning)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Walk along the zone, turning around at either boundary.
    /// The body is kept inside the band.
    pub fn patrol(&mut self, dt: f32) {
        self.pos.x += self.speed * self.direction * dt;

        if self.pos.x < self.zone_start {
            self.pos.x = self.zone_start;
            self.direction = 1.0;
        } else if self.pos.x + self.size.x > self.zone_end {
            self.pos.x = self.zone_end - self.size.x;
            self.direction = -1.0;
        }
    }

    /// Shoot toward the player when in range and off cooldown.
    /// Returns the spawn position of the new projectile.
    pub fn try_fire(
        &mut self,
        target: Rect,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<Vec2> {
        let dx = target.center().x - self.rect().center().x;
        if dx.abs() >= tuning.enemy.detection_radius || self.cooldown > 0.0 {
            return None;
        }

        let size = Vec2::new(tuning.projectile.width, tuning.projectile.height);
        let sign = if dx >= 0.0 { 1.0 } else { -1.0 };
        let x = if sign > 0.0 {
            self.pos.x + self.size.x
        } else {
            self.pos.x - size.x
        };
        let pos = Vec2::new(x, self.pos.y + self.size.y / 2.0);
        self.projectiles.push(Projectile::new(
            pos,
            size,
            sign * tuning.enemy.shot_speed,
            Owner::Enemy,
        ));
        self.cooldown = tuning.enemy.cooldown.sample(rng);
        Some(pos)
    }

    #[inline]
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown -= dt;
    }

    /// Move shots, cull escaped ones, and apply hits to the player.
    /// Returns the number of shots that connected.
    pub fn resolve_shots(&mut self, player: &mut Player, dt: f32, window: &WorldWindow) -> u32 {
        advance_and_cull(&mut self.projectiles, dt, window);

        let target = player.rect();
        let before = self.projectiles.len();
        self.projectiles.retain(|shot| !intersects(shot.rect(), target));
        let hits = (before - self.projectiles.len()) as u32;
        for _ in 0..hits {
            player.take_hit();
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn zone() -> SpawnZone {
        SpawnZone::new(500.0, 900.0)
    }

    #[test]
    fn test_spawn_in_lands_inside_zone() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let e = Enemy::spawn_in(&zone(), &tuning, &mut rng);
            assert!(e.pos.x >= 500.0);
            assert!(e.rect().right() <= 900.0);
            assert!((50.0..150.0).contains(&e.cooldown));
            assert_eq!(e.rect().bottom(), tuning.viewport.ground_line());
        }
    }

    #[test]
    fn test_patrol_turns_at_boundaries() {
        let tuning = Tuning::default();
        let mut e = Enemy::new(&zone(), 849.0, 100.0, &tuning);
        e.patrol(1.0);
        assert_eq!(e.direction, -1.0);
        assert_eq!(e.rect().right(), 900.0);

        e.pos.x = 501.0;
        e.patrol(1.0);
        assert_eq!(e.direction, 1.0);
        assert_eq!(e.pos.x, 500.0);
    }

    #[test]
    fn test_patrol_never_leaves_band() {
        let tuning = Tuning::default();
        let mut e = Enemy::new(&zone(), 700.0, 100.0, &tuning);
        for _ in 0..2000 {
            e.patrol(1.7);
            assert!(e.pos.x >= e.zone_start);
            assert!(e.rect().right() <= e.zone_end);
        }
    }

    #[test]
    fn test_fires_toward_player_side() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut e = Enemy::new(&zone(), 600.0, 0.0, &tuning);
        let left_target = Rect::new(450.0, 380.0, 50.0, 50.0);
        let pos = e.try_fire(left_target, &tuning, &mut rng).expect("in range");
        assert_eq!(pos, Vec2::new(592.0, 405.0));
        assert_eq!(e.projectiles[0].speed, -5.0);
        assert!((50.0..200.0).contains(&e.cooldown));

        let mut e = Enemy::new(&zone(), 600.0, 0.0, &tuning);
        let right_target = Rect::new(750.0, 380.0, 50.0, 50.0);
        let pos = e.try_fire(right_target, &tuning, &mut rng).expect("in range");
        assert_eq!(pos.x, 650.0);
        assert_eq!(e.projectiles[0].speed, 5.0);
    }

    #[test]
    fn test_holds_fire_out_of_range_or_cooling_down() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut e = Enemy::new(&zone(), 600.0, 0.0, &tuning);
        let far = Rect::new(100.0, 380.0, 50.0, 50.0);
        assert!(e.try_fire(far, &tuning, &mut rng).is_none());

        let mut e = Enemy::new(&zone(), 600.0, 0.5, &tuning);
        let near = Rect::new(550.0, 380.0, 50.0, 50.0);
        assert!(e.try_fire(near, &tuning, &mut rng).is_none());
        e.tick_cooldown(1.0);
        assert!(e.try_fire(near, &tuning, &mut rng).is_some());
    }

    #[test]
    fn test_shot_hits_player_once() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut e = Enemy::new(&zone(), 600.0, 0.0, &tuning);
        e.projectiles.push(Projectile::new(
            Vec2::new(player.rect().right() + 2.0, 405.0),
            Vec2::splat(8.0),
            -5.0,
            Owner::Enemy,
        ));
        let window = WorldWindow::new(0.0, 800.0, 50.0);

        assert_eq!(e.resolve_shots(&mut player, 1.0, &window), 1);
        assert_eq!(player.health, 2);
        assert!(e.projectiles.is_empty());
        assert_eq!(e.resolve_shots(&mut player, 1.0, &window), 0);
        assert_eq!(player.health, 2);
    }
}
