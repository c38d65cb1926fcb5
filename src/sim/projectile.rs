//! Short-lived point-mass projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use crate::consts::PROJECTILE_LIFETIME;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining lifetime in seconds
    pub lifetime: f32,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            lifetime: PROJECTILE_LIFETIME,
        }
    }

    /// Advance by `dt` seconds. Projectiles deliberately do not wrap at
    /// the playfield edges; they expire by lifetime instead.
    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        self.position += self.velocity * dt;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Point-in-polygon test of the current position against the
    /// asteroid's current shape
    pub fn hits(&self, asteroid: &Asteroid) -> bool {
        asteroid.contains(self.position)
    }
}
