//! Arena bounds
//!
//! Axis-aligned rectangle in screen-style coordinates (y grows downward).
//! Containment is half-open: `left <= x < right`, `top <= y < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The playfield rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

/// One of the four arena edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

impl Arena {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Clamp a point so a circle of `radius` around it stays inside
    pub fn clamp_inset(&self, p: Vec2, radius: f32) -> Vec2 {
        let lo = self.min + Vec2::splat(radius);
        let hi = (self.max - Vec2::splat(radius)).max(lo);
        p.clamp(lo, hi)
    }

    /// Point on `edge` at fraction `t` (0..1) along it
    pub fn point_on_edge(&self, edge: Edge, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match edge {
            Edge::Top => Vec2::new(self.min.x + t * self.width(), self.min.y),
            Edge::Bottom => Vec2::new(self.min.x + t * self.width(), self.max.y),
            Edge::Left => Vec2::new(self.min.x, self.min.y + t * self.height()),
            Edge::Right => Vec2::new(self.max.x, self.min.y + t * self.height()),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
        Self::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }
}
