//! Projectiles fired by the player and by enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::Collider;
use crate::consts::*;
use crate::{angle_to, direction};

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Player bullet, hurts enemies
    Friendly,
    /// Enemy bullet, hurts the player
    Hostile,
}

/// Bullet behavior tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletKind {
    #[default]
    Standard,
    /// Fast, drawn as a line
    Laser,
    /// Re-aims at the nearest enemy every tick
    Homing,
    /// Survives enemy hits
    Piercing,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Travel angle (radians)
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub owner: Owner,
    pub damage: i32,
    pub kind: BulletKind,
    /// Ticks left before the bullet is culled
    pub lifetime: u32,
    pub glow_ticks: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, owner: Owner) -> Self {
        Self {
            pos,
            angle,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            owner,
            damage: 1,
            kind: BulletKind::Standard,
            lifetime: BULLET_LIFETIME,
            glow_ticks: MUZZLE_GLOW_TICKS,
        }
    }

    pub fn friendly(pos: Vec2, angle: f32) -> Self {
        Self::new(pos, angle, Owner::Friendly)
    }

    pub fn hostile(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            speed,
            ..Self::new(pos, angle, Owner::Hostile)
        }
    }

    pub fn with_kind(mut self, kind: BulletKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    #[inline]
    pub fn is_piercing(&self) -> bool {
        self.kind == BulletKind::Piercing
    }

    /// Advance one tick.
    ///
    /// Homing bullets turn toward `homing_target` when one is given and fly
    /// straight on their last angle otherwise. A step that would leave the
    /// arena zeroes the lifetime instead of moving the bullet.
    pub fn update(&mut self, arena: &Arena, homing_target: Option<Vec2>) {
        if self.kind == BulletKind::Homing {
            if let Some(target) = homing_target {
                if target != self.pos {
                    self.angle = angle_to(self.pos, target);
                }
            }
        }

        let next = self.pos + direction(self.angle) * self.speed;
        if arena.contains(next) {
            self.pos = next;
        } else {
            self.lifetime = 0;
        }

        self.lifetime = self.lifetime.saturating_sub(1);
        self.glow_ticks = self.glow_ticks.saturating_sub(1);
    }

    /// Removal predicate: expired or outside the arena
    #[inline]
    pub fn is_expired(&self, arena: &Arena) -> bool {
        self.lifetime == 0 || !arena.contains(self.pos)
    }
}

impl Collider for Bullet {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_flight() {
        let arena = Arena::default();
        let mut bullet = Bullet::friendly(Vec2::new(100.0, 100.0), 0.0);
        bullet.update(&arena, None);
        assert!((bullet.pos.x - 110.0).abs() < 1e-4);
        assert_eq!(bullet.lifetime, BULLET_LIFETIME - 1);
    }

    #[test]
    fn test_leaving_arena_zeroes_lifetime_without_moving() {
        let arena = Arena::default();
        let start = Vec2::new(795.0, 100.0);
        let mut bullet = Bullet::friendly(start, 0.0);
        bullet.update(&arena, None);
        assert_eq!(bullet.pos, start);
        assert_eq!(bullet.lifetime, 0);
        assert!(bullet.is_expired(&arena));
    }

    #[test]
    fn test_lifetime_runs_out() {
        let arena = Arena::default();
        let mut bullet = Bullet::friendly(Vec2::new(400.0, 300.0), 0.0).with_speed(0.0);
        bullet.lifetime = 2;
        bullet.update(&arena, None);
        assert!(!bullet.is_expired(&arena));
        bullet.update(&arena, None);
        assert!(bullet.is_expired(&arena));
        bullet.update(&arena, None);
        assert_eq!(bullet.lifetime, 0);
    }

    #[test]
    fn test_homing_turns_toward_target() {
        let arena = Arena::default();
        let mut bullet = Bullet::friendly(Vec2::new(100.0, 100.0), 0.0).with_kind(BulletKind::Homing);
        bullet.update(&arena, Some(Vec2::new(100.0, 300.0)));
        assert!((bullet.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((bullet.pos.y - 110.0).abs() < 1e-4);
    }

    #[test]
    fn test_homing_without_target_flies_straight() {
        let arena = Arena::default();
        let mut bullet = Bullet::friendly(Vec2::new(100.0, 100.0), 0.3).with_kind(BulletKind::Homing);
        for _ in 0..5 {
            bullet.update(&arena, None);
        }
        assert!((bullet.angle - 0.3).abs() < 1e-6);
        let expected = Vec2::new(100.0, 100.0) + direction(0.3) * 50.0;
        assert!(bullet.pos.distance(expected) < 1e-3);
    }

    #[test]
    fn test_standard_bullet_ignores_target() {
        let arena = Arena::default();
        let mut bullet = Bullet::friendly(Vec2::new(100.0, 100.0), 0.0);
        bullet.update(&arena, Some(Vec2::new(100.0, 300.0)));
        assert_eq!(bullet.angle, 0.0);
    }
}
