//! Entity manager: owns every live bullet, enemy, power-up and particle
//!
//! Other systems borrow the collections through this aggregate; nothing
//! else keeps entities alive. Removal is always mark-then-compact so a pass
//! never skips or revisits an element.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::arena::{Arena, Edge};
use super::behavior::EnemyBehavior;
use super::bullet::{Bullet, BulletKind};
use super::enemy::{Enemy, EnemyKind};
use super::particle::Particle;
use super::powerup::PowerUp;
use crate::consts::*;

/// Number of enemies in a wave: ⌈2·e^(0.2·wave)⌉
pub fn wave_size(wave: u32) -> usize {
    (2.0 * (0.2 * wave as f64).exp()).ceil() as usize
}

#[derive(Debug, Clone)]
pub struct EntityManager {
    pub arena: Arena,
    /// Friendly bullets
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub wave: u32,
    next_id: u32,
}

impl EntityManager {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            wave: 1,
            next_id: 1,
        }
    }

    /// Drop everything and go back to wave 1 with no score
    pub fn reset(&mut self) {
        *self = Self::new(self.arena);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance every collection by one tick
    pub fn update<R: Rng>(
        &mut self,
        player_pos: Vec2,
        behavior: &mut EnemyBehavior,
        time_ticks: u64,
        rng: &mut R,
    ) {
        self.update_bullets();
        self.update_enemies(player_pos, behavior, time_ticks, rng);
        self.update_particles();
        self.update_powerups();
    }

    /// Step and cull both bullet lists; homing bullets re-target the
    /// nearest live enemy first
    pub fn update_bullets(&mut self) {
        let arena = self.arena;
        for i in 0..self.bullets.len() {
            let target = if self.bullets[i].kind == BulletKind::Homing {
                self.nearest_enemy(self.bullets[i].pos).map(|e| e.pos)
            } else {
                None
            };
            self.bullets[i].update(&arena, target);
        }
        self.bullets.retain(|b| !b.is_expired(&arena));

        for bullet in &mut self.enemy_bullets {
            bullet.update(&arena, None);
        }
        self.enemy_bullets.retain(|b| !b.is_expired(&arena));
    }

    pub fn update_enemies<R: Rng>(
        &mut self,
        player_pos: Vec2,
        behavior: &mut EnemyBehavior,
        time_ticks: u64,
        rng: &mut R,
    ) {
        let arena = self.arena;
        for enemy in &mut self.enemies {
            behavior.update(
                enemy,
                player_pos,
                self.score,
                time_ticks,
                &arena,
                &mut self.enemy_bullets,
                rng,
            );
        }
    }

    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_expired());
    }

    /// Pulse power-ups and cull any that ended up outside the arena
    pub fn update_powerups(&mut self) {
        let arena = self.arena;
        for powerup in &mut self.powerups {
            powerup.update();
        }
        self.powerups.retain(|p| {
            let keep = arena.contains(p.pos);
            if !keep {
                log::debug!("Removed stale {:?} power-up", p.kind);
            }
            keep
        });
    }

    /// Closest live enemy to `pos`, or None when the field is empty
    pub fn nearest_enemy(&self, pos: Vec2) -> Option<&Enemy> {
        self.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .partial_cmp(&b.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Spawn a wave on the arena perimeter
    pub fn spawn_enemies<R: Rng>(
        &mut self,
        wave: u32,
        behavior: &EnemyBehavior,
        graze_level: u32,
        rng: &mut R,
    ) {
        let count = wave_size(wave);
        for _ in 0..count {
            let kind = behavior.roll_enemy_kind(graze_level, rng);
            let edge = *Edge::ALL.choose(rng).unwrap_or(&Edge::Top);
            let pos = self.arena.point_on_edge(edge, rng.random_range(0.0..=1.0));
            self.add_enemy(kind, pos);
        }
        log::debug!("Spawned {} enemies for wave {}", count, wave);
    }

    pub fn add_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos));
        id
    }

    /// Death burst at `pos`
    pub fn add_particles<R: Rng>(&mut self, pos: Vec2, rng: &mut R) {
        self.particles.extend(Particle::burst(pos, rng));
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Damage every enemy, remove the dead (crediting score) and wipe
    /// enemy bullets
    pub fn detonate_bomb(&mut self) {
        let mut gained = 0;
        for enemy in &mut self.enemies {
            enemy.take_damage(BOMB_DAMAGE);
            if enemy.is_dead() {
                gained += enemy.score_value;
            }
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        self.score += gained;
        self.enemy_bullets.clear();
        log::info!(
            "Bomb destroyed {} enemies (+{})",
            before - self.enemies.len(),
            gained
        );
    }

    /// Kill everything on screen for a flat bonus per enemy
    pub fn clear_screen(&mut self) {
        self.enemy_bullets.clear();
        self.score += self.enemies.len() as u64 * CLEAR_SCREEN_BONUS;
        self.enemies.clear();
    }

    #[inline]
    pub fn wave_cleared(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUpKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn manager() -> EntityManager {
        EntityManager::new(Arena::default())
    }

    #[test]
    fn test_wave_size_curve() {
        assert_eq!(wave_size(1), 3);
        assert_eq!(wave_size(2), 3);
        assert_eq!(wave_size(5), 6);
        assert_eq!(wave_size(10), 15);
    }

    #[test]
    fn test_spawn_on_perimeter() {
        let mut em = manager();
        let behavior = EnemyBehavior::new();
        let mut rng = Pcg32::seed_from_u64(21);
        em.spawn_enemies(4, &behavior, 0, &mut rng);
        assert_eq!(em.enemies.len(), wave_size(4));
        let a = em.arena;
        for e in &em.enemies {
            let on_edge = e.pos.x == a.min.x || e.pos.x == a.max.x || e.pos.y == a.min.y || e.pos.y == a.max.y;
            assert!(on_edge, "{:?}", e.pos);
        }
        // IDs are unique and ascending
        assert!(em.enemies.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_homing_retargets_nearest() {
        let mut em = manager();
        em.add_enemy(EnemyKind::Normal, Vec2::new(600.0, 100.0));
        em.add_enemy(EnemyKind::Normal, Vec2::new(100.0, 400.0));
        em.bullets.push(Bullet::friendly(Vec2::new(100.0, 100.0), 0.0).with_kind(BulletKind::Homing));
        em.update_bullets();
        assert!((em.bullets[0].angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_homing_with_no_enemies() {
        let mut em = manager();
        em.bullets.push(Bullet::friendly(Vec2::new(100.0, 100.0), 0.25).with_kind(BulletKind::Homing));
        for _ in 0..3 {
            em.update_bullets();
        }
        assert_eq!(em.bullets.len(), 1);
        assert!((em.bullets[0].angle - 0.25).abs() < 1e-6);
        assert!(em.nearest_enemy(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_bullets_culled_at_bounds() {
        let mut em = manager();
        em.bullets.push(Bullet::friendly(Vec2::new(795.0, 100.0), 0.0));
        em.enemy_bullets.push(Bullet::hostile(Vec2::new(400.0, 3.0), -std::f32::consts::FRAC_PI_2, 5.0));
        em.update_bullets();
        assert!(em.bullets.is_empty());
        assert!(em.enemy_bullets.is_empty());
    }

    #[test]
    fn test_particles_capped_and_expire() {
        let mut em = manager();
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..40 {
            em.add_particles(Vec2::new(400.0, 300.0), &mut rng);
        }
        assert_eq!(em.particles.len(), MAX_PARTICLES);
        for _ in 0..60 {
            em.update_particles();
        }
        assert!(em.particles.is_empty());
    }

    #[test]
    fn test_stale_powerups_removed() {
        let mut em = manager();
        em.powerups.push(PowerUp::new(Vec2::new(900.0, 100.0), PowerUpKind::Laser));
        em.powerups.push(PowerUp::new(Vec2::new(100.0, 100.0), PowerUpKind::Bomb));
        em.update_powerups();
        assert_eq!(em.powerups.len(), 1);
    }

    #[test]
    fn test_clear_screen() {
        let mut em = manager();
        em.add_enemy(EnemyKind::Boss, Vec2::new(100.0, 100.0));
        em.add_enemy(EnemyKind::Tough, Vec2::new(200.0, 100.0));
        em.enemy_bullets.push(Bullet::hostile(Vec2::new(50.0, 50.0), 0.0, 5.0));
        em.clear_screen();
        assert!(em.wave_cleared());
        assert!(em.enemy_bullets.is_empty());
        assert_eq!(em.score, 2 * CLEAR_SCREEN_BONUS);
    }

    #[test]
    fn test_reset() {
        let mut em = manager();
        em.add_enemy(EnemyKind::Normal, Vec2::new(1.0, 1.0));
        em.score = 500;
        em.wave = 4;
        em.reset();
        assert!(em.enemies.is_empty());
        assert_eq!(em.score, 0);
        assert_eq!(em.wave, 1);
    }
}
