//! Grazing: risk/reward meter for near misses
//!
//! Hazards passing between the player's hitbox and the outer graze radius
//! fill the meter; a full meter is a level-up worth one extra hit point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle_to;
use crate::consts::*;

/// Which band a graze landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrazeZone {
    /// Within the inner radius, fast fill
    Red,
    /// Between inner and outer radius, slow fill
    Blue,
}

/// Fading arc shown around the player where a graze happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrazeRing {
    pub pos: Vec2,
    /// Direction from player to the hazard
    pub angle: f32,
    pub zone: GrazeZone,
    pub ticks_left: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrazingSystem {
    pub meter: f32,
    pub level: u32,
    pub rings: Vec<GrazeRing>,
}

impl Default for GrazingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GrazingSystem {
    pub fn new() -> Self {
        Self {
            meter: 0.0,
            level: 0,
            rings: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Score every hazard for this tick.
    ///
    /// Returns true when the meter filled and the level went up; the caller
    /// grants the extra hit.
    pub fn update(&mut self, player_pos: Vec2, hitbox: f32, hazards: impl IntoIterator<Item = Vec2>) -> bool {
        self.fade_rings();
        for hazard in hazards {
            self.check_graze(player_pos, hitbox, hazard);
        }

        if self.meter >= GRAZE_MAX_METER {
            self.level_up();
            return true;
        }
        false
    }

    /// Award meter for one hazard if it sits in the graze band
    pub fn check_graze(&mut self, player_pos: Vec2, hitbox: f32, hazard: Vec2) -> Option<GrazeZone> {
        let distance = player_pos.distance(hazard);
        if distance <= hitbox || distance > GRAZE_OUTER {
            return None;
        }

        let (zone, award) = if distance <= GRAZE_INNER {
            (GrazeZone::Red, GRAZE_INNER_AWARD)
        } else {
            (GrazeZone::Blue, GRAZE_OUTER_AWARD)
        };
        self.add_meter(award);
        self.rings.push(GrazeRing {
            pos: player_pos,
            angle: angle_to(player_pos, hazard),
            zone,
            ticks_left: GRAZE_RING_TICKS,
        });
        Some(zone)
    }

    /// Add meter, saturating at the maximum
    pub fn add_meter(&mut self, amount: f32) {
        self.meter = (self.meter + amount).min(GRAZE_MAX_METER);
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.meter = 0.0;
        log::info!("Graze level up! New level: {}", self.level);
    }

    fn fade_rings(&mut self) {
        for ring in &mut self.rings {
            ring.ticks_left = ring.ticks_left.saturating_sub(1);
        }
        self.rings.retain(|r| r.ticks_left > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORIGIN: Vec2 = Vec2::ZERO;
    const NO_HAZARDS: [Vec2; 0] = [];

    #[test]
    fn test_zones() {
        let mut graze = GrazingSystem::new();
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(4.0, 0.0)), None);
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(5.0, 0.0)), None);
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(20.0, 0.0)), Some(GrazeZone::Red));
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(30.0, 0.0)), Some(GrazeZone::Red));
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(45.0, 0.0)), Some(GrazeZone::Blue));
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(60.0, 0.0)), Some(GrazeZone::Blue));
        assert_eq!(graze.check_graze(ORIGIN, 5.0, Vec2::new(61.0, 0.0)), None);
        assert!((graze.meter - 5.0).abs() < 1e-6);
        assert_eq!(graze.rings.len(), 4);
    }

    #[test]
    fn test_level_up_resets_meter() {
        let mut graze = GrazingSystem::new();
        graze.add_meter(99.0);
        assert!(!graze.update(ORIGIN, 5.0, NO_HAZARDS));
        assert!(graze.update(ORIGIN, 5.0, [Vec2::new(10.0, 0.0)]));
        assert_eq!(graze.level, 1);
        assert_eq!(graze.meter, 0.0);
    }

    #[test]
    fn test_rings_fade() {
        let mut graze = GrazingSystem::new();
        graze.update(ORIGIN, 5.0, [Vec2::new(40.0, 0.0)]);
        assert_eq!(graze.rings.len(), 1);
        for _ in 0..GRAZE_RING_TICKS {
            graze.update(ORIGIN, 5.0, NO_HAZARDS);
        }
        assert!(graze.rings.is_empty());
    }

    proptest! {
        #[test]
        fn prop_meter_bounded(distances in proptest::collection::vec(0.0f32..80.0, 0..200)) {
            let mut graze = GrazingSystem::new();
            let hazards: Vec<Vec2> = distances.iter().map(|d| Vec2::new(*d, 0.0)).collect();
            let level_before = graze.level;
            let leveled = graze.update(ORIGIN, 5.0, hazards);
            prop_assert!(graze.meter <= GRAZE_MAX_METER);
            if leveled {
                prop_assert_eq!(graze.meter, 0.0);
                prop_assert_eq!(graze.level, level_before + 1);
            } else {
                prop_assert_eq!(graze.level, level_before);
            }
        }
    }
}
