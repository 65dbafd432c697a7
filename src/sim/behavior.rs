//! Enemy AI: per-type movement and firing policy
//!
//! Behavior is keyed only by `EnemyKind`; the single piece of state is the
//! difficulty multiplier, recomputed from the score on every update.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bullet::Bullet;
use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;
use crate::{angle_to, direction};

/// Difficulty multiplier for a score: +0.1 per 1000 points, capped at 2.0
pub fn difficulty_for_score(score: u64) -> f32 {
    (1.0 + (score / 1000) as f32 * 0.1).clamp(1.0, 2.0)
}

/// Angles of an `n`-shot fan centered on `aim`
pub fn fan_angles(aim: f32, n: u32) -> impl Iterator<Item = f32> {
    let half = (n as f32 - 1.0) / 2.0;
    (0..n).map(move |i| aim + (i as f32 - half) * FAN_STEP)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBehavior {
    pub difficulty: f32,
}

impl Default for EnemyBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyBehavior {
    pub fn new() -> Self {
        Self { difficulty: 1.0 }
    }

    pub fn update_difficulty(&mut self, score: u64) {
        self.difficulty = difficulty_for_score(score);
    }

    /// Move one enemy and maybe fire into `enemy_bullets`, then clamp it
    /// inside the arena inset by its radius.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng>(
        &mut self,
        enemy: &mut Enemy,
        player_pos: Vec2,
        score: u64,
        time_ticks: u64,
        arena: &Arena,
        enemy_bullets: &mut Vec<Bullet>,
        rng: &mut R,
    ) {
        self.update_difficulty(score);
        let mult = self.difficulty;

        match enemy.kind {
            EnemyKind::Normal => {
                seek(enemy, player_pos, 2.0 * mult);
                if self.fire_roll(BASE_ENEMY_FIRE_RATE, rng) {
                    self.shoot_at(enemy, player_pos, enemy_bullets);
                }
            }
            EnemyKind::Fast => {
                if seek(enemy, player_pos, 3.0 * mult) {
                    enemy.pos += Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
                }
                if self.fire_roll(BASE_ENEMY_FIRE_RATE / 2.0, rng) {
                    self.shoot_at(enemy, player_pos, enemy_bullets);
                }
            }
            EnemyKind::Tough => {
                seek(enemy, player_pos, 1.5 * mult);
                if self.fire_roll(BASE_ENEMY_FIRE_RATE, rng) {
                    let aim = angle_to(enemy.pos, player_pos);
                    let shots = 3 + mult.floor() as u32;
                    for angle in fan_angles(aim, shots) {
                        self.shoot(enemy, angle, enemy_bullets);
                    }
                }
            }
            EnemyKind::Flanker => {
                // Perpendicular to the bearing: flanks from afar, orbits up close
                let heading = angle_to(enemy.pos, player_pos) + FRAC_PI_2;
                enemy.pos += direction(heading) * 2.0 * mult;
                if self.fire_roll(BASE_ENEMY_FIRE_RATE, rng) {
                    self.shoot_at(enemy, player_pos, enemy_bullets);
                }
            }
            EnemyKind::Zigzag => {
                let speed = 2.0 * mult;
                if seek(enemy, player_pos, speed) {
                    enemy.pos.x += (enemy.pos.y / 30.0).cos() * speed;
                    enemy.pos.y += (enemy.pos.x / 30.0).sin() * speed;
                }
                if self.fire_roll(BASE_ENEMY_FIRE_RATE, rng) {
                    self.shoot_at(enemy, player_pos, enemy_bullets);
                }
            }
            EnemyKind::Boss => self.boss(enemy, player_pos, time_ticks, arena, enemy_bullets),
        }

        enemy.pos = arena.clamp_inset(enemy.pos, enemy.radius);
    }

    /// Pick a spawn type; higher graze levels unlock tougher mixes
    pub fn roll_enemy_kind<R: Rng>(&self, graze_level: u32, rng: &mut R) -> EnemyKind {
        use EnemyKind::*;

        let table: &[(EnemyKind, f32)] = match graze_level {
            0..=2 => &[(Normal, 1.0), (Fast, 1.0)],
            3..=5 => &[(Normal, 1.0), (Fast, 1.0), (Tough, 1.0)],
            6..=9 => &[
                (Normal, 1.0),
                (Fast, 1.0),
                (Tough, 2.0),
                (Flanker, 1.0),
                (Zigzag, 1.0),
            ],
            _ => &[
                (Normal, 1.0),
                (Fast, 1.0),
                (Tough, 2.0),
                (Flanker, 1.0),
                (Zigzag, 1.0),
                (Boss, 0.25),
            ],
        };

        match WeightedIndex::new(table.iter().map(|(_, w)| *w)) {
            Ok(dist) => table[dist.sample(rng)].0,
            Err(_) => Normal,
        }
    }

    /// Bernoulli fire check: one uniform draw in 1..=⌊base/mult⌋ per tick
    fn fire_roll<R: Rng>(&self, base: f32, rng: &mut R) -> bool {
        let denominator = ((base / self.difficulty) as u32).max(1);
        rng.random_range(1..=denominator) == 1
    }

    fn boss(
        &self,
        enemy: &mut Enemy,
        player_pos: Vec2,
        time_ticks: u64,
        arena: &Arena,
        enemy_bullets: &mut Vec<Bullet>,
    ) {
        let mult = self.difficulty;
        let t = time_ticks as f32 / SIM_HZ as f32;

        enemy.pos.x = arena.center().x + (t * mult).sin() * (arena.width() / 4.0);
        enemy.pos.y = (enemy.pos.y + 0.5 * mult).min(arena.min.y + 150.0);

        if (t * 2.0 * mult) as u64 % 2 == 0 {
            // Spiral: evenly spaced ring, rotating over time
            let count = (8.0 * mult) as u32;
            let phase = t * 10.0 * mult;
            for i in 0..count {
                let angle = (phase + i as f32 * TAU / count as f32).rem_euclid(TAU);
                self.shoot(enemy, angle, enemy_bullets);
            }
        } else {
            let aim = angle_to(enemy.pos, player_pos);
            for angle in fan_angles(aim, 5 + mult.floor() as u32) {
                self.shoot(enemy, angle, enemy_bullets);
            }
        }
    }

    fn shoot_at(&self, enemy: &Enemy, target: Vec2, enemy_bullets: &mut Vec<Bullet>) {
        self.shoot(enemy, angle_to(enemy.pos, target), enemy_bullets);
    }

    fn shoot(&self, enemy: &Enemy, angle: f32, enemy_bullets: &mut Vec<Bullet>) {
        enemy_bullets.push(Bullet::hostile(
            enemy.pos,
            angle,
            ENEMY_BULLET_SPEED * self.difficulty,
        ));
    }
}

/// Step toward `target`. Returns false when already on top of it.
fn seek(enemy: &mut Enemy, target: Vec2, speed: f32) -> bool {
    let delta = target - enemy.pos;
    let dist = delta.length();
    if dist == 0.0 {
        return false;
    }
    enemy.pos += delta / dist * speed;
    true
}
