//! Random asteroid generation
//!
//! All randomness in the simulation flows through an owned, seeded
//! [`Spawner`] so that a run is fully reproducible: same seed, same
//! command script, same state. The distributions here are tuning choices;
//! the only contract is that `size` scales the collision polygon.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::geom::Polygon;
use crate::consts::*;
use crate::rotate_deg;

/// Asteroid speed range, pixels per second
const SPEED_RANGE: std::ops::Range<f32> = 20.0..80.0;
/// Angular velocity range, degrees per second
const SPIN_RANGE: std::ops::Range<f32> = -90.0..90.0;
/// Vertex count range for generated outlines
const VERTEX_COUNT_RANGE: std::ops::Range<usize> = 7..13;
/// Radius jitter applied per vertex, as a fraction of the nominal radius
const RADIUS_JITTER: std::ops::Range<f32> = 0.7..1.15;

/// Seeded generator for randomized asteroids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// A random asteroid of the given size, placed uniformly at random
    /// within the playfield
    pub fn asteroid(&mut self, size: f32) -> Asteroid {
        let center = Vec2::new(
            self.rng.random_range(0.0..SPACE_WIDTH),
            self.rng.random_range(0.0..SPACE_HEIGHT),
        );
        self.asteroid_at(center, size)
    }

    /// A random asteroid of the given size at a fixed center, used for
    /// fragmentation and for rejection-sampled initial placement
    pub fn asteroid_at(&mut self, center: Vec2, size: f32) -> Asteroid {
        let speed = self.rng.random_range(SPEED_RANGE);
        let heading = self.rng.random_range(0.0..360.0);
        let velocity = rotate_deg(Vec2::X, heading) * speed;
        let angular_velocity = self.rng.random_range(SPIN_RANGE);
        let shape = self.outline(size);
        Asteroid::new(center, shape, velocity, angular_velocity, size)
    }

    /// A jagged star-convex outline centered on the origin: vertices at
    /// increasing angles around a circle of radius `size *
    /// ASTEROID_UNIT_RADIUS`, each pushed in or out by a jitter factor
    fn outline(&mut self, size: f32) -> Polygon {
        let count = self.rng.random_range(VERTEX_COUNT_RANGE);
        let nominal_radius = size * ASTEROID_UNIT_RADIUS;
        let step = 360.0 / count as f32;

        let vertices = (0..count)
            .map(|i| {
                let radius = nominal_radius * self.rng.random_range(RADIUS_JITTER);
                rotate_deg(Vec2::X, i as f32 * step) * radius
            })
            .collect();
        Polygon::new(vertices)
    }
}
