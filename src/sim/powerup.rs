//! Power-up pickups and their spawn economy

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::entities::EntityManager;
use super::player::{Player, Weapon};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Spread,
    Laser,
    Homing,
    Multishot,
    Piercing,
    Shield,
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Spread,
        PowerUpKind::Laser,
        PowerUpKind::Homing,
        PowerUpKind::Multishot,
        PowerUpKind::Piercing,
        PowerUpKind::Shield,
        PowerUpKind::Bomb,
    ];

    /// The weapon this pickup grants, if it is a weapon
    pub fn weapon(self) -> Option<Weapon> {
        match self {
            PowerUpKind::Spread => Some(Weapon::Spread),
            PowerUpKind::Laser => Some(Weapon::Laser),
            PowerUpKind::Homing => Some(Weapon::Homing),
            PowerUpKind::Multishot => Some(Weapon::Multishot),
            PowerUpKind::Piercing => Some(Weapon::Piercing),
            PowerUpKind::Shield | PowerUpKind::Bomb => None,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
    /// Cosmetic pulsation phase
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            radius: POWERUP_RADIUS,
            kind,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.pulse = (self.pulse + 0.1) % std::f32::consts::TAU;
    }
}

impl Collider for PowerUp {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Timed spawn gate plus a bag of not-yet-spawned types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSystem {
    /// Types left to draw; refilled when empty
    pub bag: Vec<PowerUpKind>,
    pub spawn_timer: u32,
}

impl Default for PowerUpSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerUpSystem {
    pub fn new() -> Self {
        Self {
            bag: PowerUpKind::ALL.to_vec(),
            spawn_timer: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the spawn timer and roll for a spawn every interval.
    /// Returns the spawned type, if any.
    pub fn update<R: Rng>(
        &mut self,
        wave: u32,
        player: &Player,
        entities: &mut EntityManager,
        rng: &mut R,
    ) -> Option<PowerUpKind> {
        self.spawn_timer += 1;
        if self.spawn_timer < POWERUP_SPAWN_INTERVAL {
            return None;
        }
        self.spawn_timer = 0;

        if wave < 2 || entities.powerups.len() >= MAX_POWERUPS {
            return None;
        }
        if !rng.random_bool(POWERUP_SPAWN_CHANCE) {
            return None;
        }

        let kind = self.draw(player.weapon, rng)?;
        let arena = entities.arena;
        let margin = POWERUP_SPAWN_MARGIN.min(arena.width() / 2.0).min(arena.height() / 2.0);
        let pos = Vec2::new(
            rng.random_range(arena.min.x + margin..=arena.max.x - margin),
            rng.random_range(arena.min.y + margin..=arena.max.y - margin),
        );
        entities.powerups.push(PowerUp::new(pos, kind));
        log::info!("Spawned {:?} power-up at ({:.0}, {:.0})", kind, pos.x, pos.y);
        Some(kind)
    }

    /// Take one type out of the bag, avoiding the weapon already held
    fn draw<R: Rng>(&mut self, held: Weapon, rng: &mut R) -> Option<PowerUpKind> {
        if self.bag.is_empty() {
            self.bag = PowerUpKind::ALL.to_vec();
        }

        let candidates: Vec<PowerUpKind> = self
            .bag
            .iter()
            .copied()
            .filter(|k| k.weapon() != Some(held))
            .collect();
        let pool = if candidates.is_empty() {
            self.bag.clone()
        } else {
            candidates
        };

        let kind = *pool.choose(rng)?;
        self.bag.retain(|k| *k != kind);
        Some(kind)
    }

    /// Apply a picked-up power-up
    pub fn activate(&self, player: &mut Player, kind: PowerUpKind, entities: &mut EntityManager) {
        match kind {
            PowerUpKind::Shield => player.activate_shield(),
            PowerUpKind::Bomb => entities.detonate_bomb(),
            _ => {
                if let Some(weapon) = kind.weapon() {
                    player.equip(weapon, POWERUP_DURATION);
                }
            }
        }
        log::info!("Activated {:?} power-up", kind);
    }
}
