//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{self, CollisionReport, in_square};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement stick, components in [-1, 1]
    pub movement: Vec2,
    /// Aim stick, components in [-1, 1]
    pub aim: Vec2,
    /// Fire held
    pub fire: bool,
    /// Melee pressed this tick
    pub sword: bool,
    /// Shield pressed this tick
    pub shield: bool,
    /// Pause toggle
    pub pause: bool,
    /// Kill everything on screen (debug/testing)
    pub clear_screen: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Running {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    if input.clear_screen {
        state.clear_screen();
    }

    state.time_ticks += 1;

    // Player timers, then intents. Shots are staged so they can't hit this tick.
    let mut fired = Vec::new();
    {
        let player = &mut state.player;
        player.update();
        player.move_by(input.movement, &state.arena);
        player.aim(input.aim);
        if input.fire {
            player.shoot(&mut fired, &mut state.rng);
        }
        if input.sword && player.sword_attack() {
            log::debug!("Sword swing at ({:.0}, {:.0})", player.pos.x, player.pos.y);
        }
        if input.shield {
            player.activate_shield();
        }
    }

    state.entities.update(
        state.player.pos,
        &mut state.behavior,
        state.time_ticks,
        &mut state.rng,
    );

    let wave = state.entities.wave;
    state
        .powerups
        .update(wave, &state.player, &mut state.entities, &mut state.rng);

    let hazards = state
        .entities
        .enemy_bullets
        .iter()
        .map(|b| b.pos)
        .chain(state.entities.enemies.iter().map(|e| e.pos));
    if state
        .graze
        .update(state.player.pos, state.player.hitbox_radius, hazards)
    {
        state.player.grant_hit();
    }

    let report = collision::resolve(
        &mut state.player,
        &mut state.entities,
        &state.powerups,
        &mut state.graze,
        &mut state.rng,
    );
    if report != CollisionReport::default() {
        log::debug!(
            "Tick {}: {} kills, {} melee hits, {} hits taken, pickup {:?}",
            state.time_ticks,
            report.enemies_killed,
            report.melee_hits,
            report.player_hits,
            report.pickup
        );
    }

    state.entities.bullets.append(&mut fired);

    if state.entities.wave_cleared() {
        state.entities.wave += 1;
        state.spawn_wave();
    }

    if !state.player.alive {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on wave {} with score {}",
            state.entities.wave,
            state.entities.score
        );
    }
}

/// Distance at which the autopilot starts running from a hazard
const FLEE_RADIUS: f32 = GRAZE_OUTER * 2.0;

/// Replace player intent with a simple AI.
///
/// Aims at and shoots the nearest enemy, backs away from the nearest hazard
/// (drifting toward the arena center otherwise), swings when an enemy is in
/// melee range and raises the shield against bullets about to land.
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let player = &state.player;
    let entities = &state.entities;
    let pos = player.pos;

    let mut out = TickInput {
        pause: input.pause,
        clear_screen: input.clear_screen,
        idle_mode: true,
        ..Default::default()
    };

    if let Some(target) = entities.nearest_enemy(pos) {
        out.aim = (target.pos - pos).normalize_or_zero();
        out.fire = true;
    }

    let nearest_hazard = entities
        .enemy_bullets
        .iter()
        .map(|b| b.pos)
        .chain(entities.enemies.iter().map(|e| e.pos))
        .min_by(|a, b| {
            a.distance_squared(pos)
                .partial_cmp(&b.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let to_center = (state.arena.center() - pos).normalize_or_zero();
    let steer = match nearest_hazard {
        Some(hazard) if hazard.distance(pos) < FLEE_RADIUS => {
            (pos - hazard).normalize_or_zero() + to_center * 0.3
        }
        _ => match entities.powerups.first() {
            Some(powerup) => (powerup.pos - pos).normalize_or_zero(),
            None => to_center * 0.5,
        },
    };
    out.movement = steer.clamp_length_max(1.0);

    let half = player.size * 2.0;
    out.sword = entities.enemies.iter().any(|e| in_square(pos, half, e.pos));
    out.shield = !player.shield_active
        && entities
            .enemy_bullets
            .iter()
            .any(|b| b.pos.distance(pos) < player.hitbox_radius + b.radius + BULLET_SPEED);

    out
}
