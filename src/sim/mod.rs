//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per step)
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (spawn order, ids ascending)
//! - No rendering or platform dependencies

pub mod arena;
pub mod behavior;
pub mod bullet;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod entities;
pub mod graze;
pub mod particle;
pub mod player;
pub mod powerup;
pub mod state;
pub mod tick;

pub use arena::{Arena, Edge};
pub use behavior::{EnemyBehavior, difficulty_for_score};
pub use bullet::{Bullet, BulletKind, Owner};
pub use clock::FixedStep;
pub use collision::{Collider, CollisionReport, collides_with};
pub use enemy::{Enemy, EnemyKind};
pub use entities::{EntityManager, wave_size};
pub use graze::{GrazeRing, GrazeZone, GrazingSystem};
pub use particle::Particle;
pub use player::{Player, Weapon};
pub use powerup::{PowerUp, PowerUpKind, PowerUpSystem};
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{TickInput, autopilot, tick};
