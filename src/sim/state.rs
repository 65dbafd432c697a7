//! Game state and the read-only render snapshot
//!
//! One `GameState` owns the player, every entity collection, the subsystems
//! and the run's only RNG. A seed plus an input stream fully determines a run.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::behavior::EnemyBehavior;
use super::bullet::Bullet;
use super::enemy::Enemy;
use super::entities::EntityManager;
use super::graze::{GrazeRing, GrazingSystem};
use super::particle::Particle;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpSystem};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Ticks are not admitted
    Paused,
    /// Run ended; waits for restart
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: EntityManager,
    pub behavior: EnemyBehavior,
    pub graze: GrazingSystem,
    pub powerups: PowerUpSystem,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new run with the first wave already on the field
    pub fn new(seed: u64, arena: Arena) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            phase: GamePhase::Running,
            player: Player::new(arena.center()),
            entities: EntityManager::new(arena),
            behavior: EnemyBehavior::new(),
            graze: GrazingSystem::new(),
            powerups: PowerUpSystem::new(),
            time_ticks: 0,
        };
        state.spawn_wave();
        state
    }

    /// Arena derived from the configured resolution
    pub fn from_settings(seed: u64, settings: &Settings) -> Self {
        Self::new(seed, settings.arena())
    }

    /// Reset everything for a fresh run on the same seed stream
    pub fn restart(&mut self) {
        self.player.reset(self.arena.center());
        self.entities.reset();
        self.behavior = EnemyBehavior::new();
        self.graze.reset();
        self.powerups.reset();
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.spawn_wave();
        log::info!("Run restarted");
    }

    /// Flip between running and paused; ignored after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => return,
        };
        log::info!("Phase changed to {:?}", self.phase);
    }

    /// Kill everything on screen (debug)
    pub fn clear_screen(&mut self) {
        let cleared = self.entities.enemies.len();
        self.entities.clear_screen();
        log::info!("Cleared {} enemies", cleared);
    }

    /// Spawn enemies for the current wave number
    pub(crate) fn spawn_wave(&mut self) {
        let wave = self.entities.wave;
        self.entities
            .spawn_enemies(wave, &self.behavior, self.graze.level, &mut self.rng);
        log::info!("Wave {} started", wave);
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.entities.score
    }

    #[inline]
    pub fn wave(&self) -> u32 {
        self.entities.wave
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Borrowed view for a renderer or for dumping
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            player: &self.player,
            bullets: &self.entities.bullets,
            enemy_bullets: &self.entities.enemy_bullets,
            enemies: &self.entities.enemies,
            powerups: &self.entities.powerups,
            particles: &self.entities.particles,
            graze_rings: &self.graze.rings,
            score: self.entities.score,
            wave: self.entities.wave,
            graze_meter: self.graze.meter,
            graze_level: self.graze.level,
            difficulty: self.behavior.difficulty,
        }
    }
}

/// Everything a renderer needs for one frame; cannot mutate the sim
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub powerups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub graze_rings: &'a [GrazeRing],
    pub score: u64,
    pub wave: u32,
    pub graze_meter: f32,
    pub graze_level: u32,
    pub difficulty: f32,
}
