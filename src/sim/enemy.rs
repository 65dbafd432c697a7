//! Enemy entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use crate::consts::{BOSS_RADIUS, ENEMY_RADIUS};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Tough,
    Flanker,
    Zigzag,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tough,
        EnemyKind::Flanker,
        EnemyKind::Zigzag,
        EnemyKind::Boss,
    ];

    pub fn starting_health(self) -> i32 {
        match self {
            EnemyKind::Boss => 50,
            EnemyKind::Tough => 3,
            _ => 1,
        }
    }

    pub fn score_value(self) -> u64 {
        match self {
            EnemyKind::Boss => 100,
            EnemyKind::Tough => 30,
            _ => 10,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Boss => BOSS_RADIUS,
            _ => ENEMY_RADIUS,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub score_value: u64,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: kind.radius(),
            health: kind.starting_health(),
            score_value: kind.score_value(),
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl Collider for Enemy {
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
    fn test_every_kind_starts_alive() {
        for kind in EnemyKind::ALL {
            let enemy = Enemy::new(1, kind, Vec2::ZERO);
            assert!(enemy.health > 0);
            assert!(!enemy.is_dead());
        }
    }

    #[test]
    fn test_boss_is_bigger() {
        let boss = Enemy::new(1, EnemyKind::Boss, Vec2::ZERO);
        let grunt = Enemy::new(2, EnemyKind::Normal, Vec2::ZERO);
        assert!(boss.radius > grunt.radius);
        assert_eq!(boss.score_value, 100);
    }

    #[test]
    fn test_damage_kills() {
        let mut enemy = Enemy::new(1, EnemyKind::Tough, Vec2::ZERO);
        enemy.take_damage(2);
        assert!(!enemy.is_dead());
        enemy.take_damage(1);
        assert!(enemy.is_dead());
    }
}
