//! The player avatar: movement, aiming, weapons, melee and shield

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bullet::{Bullet, BulletKind};
use super::collision::Collider;
use crate::consts::*;
use crate::direction;

/// Held weapon. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Default,
    Spread,
    Laser,
    Homing,
    Multishot,
    Piercing,
}

impl Weapon {
    /// Ticks between shots for a base fire rate
    pub fn cooldown(self, base: u32) -> u32 {
        match self {
            Weapon::Default | Weapon::Homing => base,
            Weapon::Spread | Weapon::Multishot => base * 2,
            Weapon::Laser => base / 2,
            Weapon::Piercing => base * 3 / 2,
        }
    }

    /// Bullets for one shot from `pos` aimed at `angle`
    fn fire<R: Rng>(self, pos: Vec2, angle: f32, rng: &mut R) -> Vec<Bullet> {
        match self {
            Weapon::Default => vec![Bullet::friendly(pos, angle)],
            Weapon::Spread => (-1..=1)
                .map(|i| Bullet::friendly(pos, angle + i as f32 * 0.2))
                .collect(),
            Weapon::Laser => vec![
                Bullet::friendly(pos, angle)
                    .with_kind(BulletKind::Laser)
                    .with_speed(LASER_SPEED),
            ],
            Weapon::Homing => vec![Bullet::friendly(pos, angle).with_kind(BulletKind::Homing)],
            Weapon::Multishot => (0..3)
                .map(|_| Bullet::friendly(pos, angle + rng.random_range(-0.1..=0.1)))
                .collect(),
            Weapon::Piercing => vec![
                Bullet::friendly(pos, angle)
                    .with_kind(BulletKind::Piercing)
                    .with_damage(PIERCING_DAMAGE),
            ],
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    /// Visual size; also scales the melee region
    pub size: f32,
    /// Collision radius
    pub hitbox_radius: f32,
    pub speed: f32,
    pub alive: bool,
    pub hits_remaining: u32,
    pub weapon: Weapon,
    /// Ticks until the weapon reverts to default (0 = no timer)
    pub weapon_timer: u32,
    pub fire_rate: u32,
    pub fire_cooldown: u32,
    pub sword_cooldown: u32,
    /// Ticks left in the melee hit window
    pub sword_active_ticks: u32,
    pub shield_active: bool,
    pub shield_timer: u32,
    pub kickback_ticks: u32,
    pub glow_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            size: PLAYER_SIZE,
            hitbox_radius: PLAYER_HITBOX,
            speed: PLAYER_SPEED,
            alive: true,
            hits_remaining: PLAYER_START_HITS,
            weapon: Weapon::Default,
            weapon_timer: 0,
            fire_rate: FIRE_RATE,
            fire_cooldown: 0,
            sword_cooldown: 0,
            sword_active_ticks: 0,
            shield_active: false,
            shield_timer: 0,
            kickback_ticks: 0,
            glow_ticks: 0,
        }
    }

    /// Reset for a new run, keeping nothing from the previous one
    pub fn reset(&mut self, pos: Vec2) {
        *self = Self::new(pos);
    }

    /// Move by a stick intent (components expected in [-1, 1]).
    ///
    /// While recoiling, the player is nudged opposite the aim intent (the
    /// facing angle the last shot left along), with a strength that decays
    /// over the kickback window. The movement intent plays no part in it.
    pub fn move_by(&mut self, intent: Vec2, arena: &Arena) {
        let mut pos = self.pos + intent * self.speed;
        if self.kickback_ticks > 0 {
            let falloff = self.kickback_ticks as f32 / KICKBACK_TICKS as f32;
            pos -= direction(self.angle) * KICKBACK_STRENGTH * falloff;
        }
        self.pos = arena.clamp_inset(pos, self.hitbox_radius);
    }

    /// Face along a stick vector; idle sticks inside the deadzone are ignored
    pub fn aim(&mut self, stick: Vec2) {
        if stick.length() > AIM_DEADZONE {
            self.angle = stick.y.atan2(stick.x);
        }
    }

    /// Fire the current weapon into `bullets`. Returns false while cooling down.
    pub fn shoot<R: Rng>(&mut self, bullets: &mut Vec<Bullet>, rng: &mut R) -> bool {
        if self.fire_cooldown > 0 {
            return false;
        }
        bullets.extend(self.weapon.fire(self.pos, self.angle, rng));
        self.fire_cooldown = self.weapon.cooldown(self.fire_rate);
        self.kickback_ticks = KICKBACK_TICKS;
        true
    }

    /// Start a melee swing. Returns false while the sword is cooling down.
    pub fn sword_attack(&mut self) -> bool {
        if self.sword_cooldown > 0 {
            return false;
        }
        self.sword_cooldown = SWORD_COOLDOWN;
        self.sword_active_ticks = SWORD_ACTIVE_TICKS;
        true
    }

    #[inline]
    pub fn sword_active(&self) -> bool {
        self.sword_active_ticks > 0
    }

    /// Raise the shield; does nothing if it is already up
    pub fn activate_shield(&mut self) {
        if !self.shield_active {
            self.shield_active = true;
            self.shield_timer = SHIELD_DURATION;
        }
    }

    /// Lose one hit unless shielded
    pub fn take_damage(&mut self) {
        if self.shield_active {
            return;
        }
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.glow_ticks = DAMAGE_GLOW_TICKS;
        if self.hits_remaining == 0 {
            self.alive = false;
        }
    }

    /// One extra hit point (graze level-up)
    pub fn grant_hit(&mut self) {
        self.hits_remaining += 1;
    }

    /// Equip a timed weapon
    pub fn equip(&mut self, weapon: Weapon, duration: u32) {
        self.weapon = weapon;
        self.weapon_timer = duration;
    }

    /// Count down every timer by one tick
    pub fn update(&mut self) {
        if self.shield_active {
            self.shield_timer = self.shield_timer.saturating_sub(1);
            if self.shield_timer == 0 {
                self.shield_active = false;
            }
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.sword_cooldown = self.sword_cooldown.saturating_sub(1);
        self.sword_active_ticks = self.sword_active_ticks.saturating_sub(1);

        if self.weapon_timer > 0 {
            self.weapon_timer -= 1;
            if self.weapon_timer == 0 {
                log::info!("{:?} expired", self.weapon);
                self.weapon = Weapon::Default;
            }
        }

        self.kickback_ticks = self.kickback_ticks.saturating_sub(1);
        self.glow_ticks = self.glow_ticks.saturating_sub(1);
    }
}

impl Collider for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.hitbox_radius
    }
}
