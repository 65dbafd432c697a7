//! Cosmetic particles (no collision)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_BURST;
use crate::direction;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Ticks left
    pub lifetime: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += direction(self.angle) * self.speed;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }

    /// Radial burst of particles at `pos`
    pub fn burst<R: Rng>(pos: Vec2, rng: &mut R) -> Vec<Particle> {
        (0..PARTICLE_BURST)
            .map(|_| Particle {
                pos,
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                speed: rng.random_range(1.0..3.0),
                lifetime: rng.random_range(30..=60),
            })
            .collect()
    }
}
