//! Drifting polygonal asteroids
//!
//! An asteroid is a polygon with linear and angular velocity and no
//! acceleration, so it travels in a straight line while tumbling. Its
//! world-space shape is recomputed from the local outline on every query,
//! never cached.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Polygon;
use super::space::toric_remap;
use super::spawn::Spawner;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    /// Center of the asteroid in world coordinates
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Accumulated rotation since creation, degrees (unbounded)
    pub angle: f32,
    /// Rotation rate in degrees per second
    pub angular_velocity: f32,
    /// Outline in local coordinates, centered on the origin
    shape: Polygon,
    /// Size factor (arbitrary but fixed unit); scales the outline
    size: f32,
}

impl Asteroid {
    pub fn new(
        center: Vec2,
        shape: Polygon,
        velocity: Vec2,
        angular_velocity: f32,
        size: f32,
    ) -> Self {
        Self {
            position: center,
            velocity,
            angle: 0.0,
            angular_velocity,
            shape,
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// World-space outline: the local shape rotated by the accumulated
    /// angle and translated to the current position
    pub fn shape(&self) -> Polygon {
        self.shape.rotate(self.angle).translate(self.position)
    }

    /// Advance the asteroid by `dt` seconds, wrapping across playfield
    /// edges. The angle accumulates without normalization; trigonometry
    /// downstream handles that implicitly.
    pub fn update(&mut self, dt: f32) {
        self.position = toric_remap(self.position + self.velocity * dt);
        self.angle += self.angular_velocity * dt;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.shape().contains(point)
    }

    /// Fragments spawned when this asteroid is destroyed.
    ///
    /// Three candidates are generated at 0.75x size, but only candidates
    /// landing exactly on `LIMIT_ASTEROID_SIZE` survive. So size-2
    /// asteroids break into limit-size fragments, and limit-size asteroids
    /// vanish without offspring. The equality comparison (rather than a
    /// `>=` floor check) is a deliberate rules decision; see DESIGN.md
    /// before changing it.
    pub fn fragments(&self, spawner: &mut Spawner) -> Vec<Asteroid> {
        let mut survivors = Vec::new();
        for _ in 0..ASTEROID_FRAGMENT_COUNT {
            let candidate = spawner.asteroid_at(self.position, self.size * FRAGMENT_SIZE_RATIO);
            if candidate.size() == LIMIT_ASTEROID_SIZE {
                survivors.push(candidate);
            }
        }
        survivors
    }
}
