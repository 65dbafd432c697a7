//! Twin Arena - A twin-stick arena shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (entities, AI, collisions, game state)
//! - `settings`: Persisted configuration consumed by the host loop
//! - `error`: Errors for the settings I/O surface (the sim itself never fails)

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{ControlScheme, Difficulty, DisplayMode, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// All durations are in simulation ticks, all distances in arena units.
pub mod consts {
    /// Nominal tick rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep at the nominal rate
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame time the host clock will accept (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_HITBOX: f32 = 5.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_HITS: u32 = 1;
    /// Aim stick deadzone
    pub const AIM_DEADZONE: f32 = 0.1;
    /// Base fire rate R (ticks between default shots)
    pub const FIRE_RATE: u32 = 15;

    /// Melee
    pub const SWORD_COOLDOWN: u32 = 30;
    pub const SWORD_ACTIVE_TICKS: u32 = 6;
    pub const SWORD_DAMAGE: i32 = 5;
    pub const SWORD_GRAZE_REWARD: f32 = 5.0;
    pub const SWORD_HIT_SCORE: u64 = 10;

    pub const SHIELD_DURATION: u32 = 60;

    /// Recoil after firing
    pub const KICKBACK_TICKS: u32 = 6;
    pub const KICKBACK_STRENGTH: f32 = 1.5;

    /// Cosmetic glow durations
    pub const DAMAGE_GLOW_TICKS: u32 = 20;
    pub const MUZZLE_GLOW_TICKS: u32 = 6;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_LIFETIME: u32 = 180;
    pub const LASER_SPEED: f32 = 20.0;
    pub const PIERCING_DAMAGE: i32 = 3;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;

    /// Enemies
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const BOSS_RADIUS: f32 = 30.0;
    pub const BASE_ENEMY_FIRE_RATE: f32 = 60.0;
    /// Angle between shots in a fan
    pub const FAN_STEP: f32 = 0.2;

    /// Grazing
    pub const GRAZE_INNER: f32 = 30.0;
    pub const GRAZE_OUTER: f32 = 60.0;
    pub const GRAZE_MAX_METER: f32 = 100.0;
    pub const GRAZE_INNER_AWARD: f32 = 2.0;
    pub const GRAZE_OUTER_AWARD: f32 = 0.5;
    pub const GRAZE_RING_TICKS: u32 = 30;

    /// Power-ups
    pub const POWERUP_DURATION: u32 = 600;
    pub const POWERUP_RADIUS: f32 = 20.0;
    pub const MAX_POWERUPS: usize = 3;
    pub const POWERUP_SPAWN_INTERVAL: u32 = 300;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.3;
    pub const POWERUP_SPAWN_MARGIN: f32 = 50.0;
    pub const BOMB_DAMAGE: i32 = 10;
    pub const CLEAR_SCREEN_BONUS: u64 = 10;

    /// Particles
    pub const PARTICLE_BURST: usize = 20;
    pub const MAX_PARTICLES: usize = 512;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
