//! Toroids - an asteroids-style arcade game on a wrapped playfield
//!
//! This crate is only the simulation core. Rendering, input wiring and the
//! frame-timing loop live in the presentation layer, which drives the game
//! exclusively through [`sim::Space`]: it forwards engine/fire commands,
//! calls `update(dt)` once per frame and reads entity state back through
//! accessors.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, scoring, tick
//!   pipeline)

pub mod sim;

pub use sim::{Space, UpdateError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield width in pixels. The field is toric: both axes wrap.
    pub const SPACE_WIDTH: f32 = 800.0;
    /// Playfield height in pixels
    pub const SPACE_HEIGHT: f32 = 800.0;

    /// Asteroids present when a game starts
    pub const INITIAL_ASTEROID_COUNT: usize = 10;
    /// Size of the starting asteroids (arbitrary but fixed unit)
    pub const INITIAL_ASTEROID_SIZE: f32 = 2.0;
    /// Fragments of this size no longer fragment further
    pub const LIMIT_ASTEROID_SIZE: f32 = 1.5;
    /// Fragment candidates generated per destroyed asteroid
    pub const ASTEROID_FRAGMENT_COUNT: usize = 3;
    /// Size of a fragment relative to its parent
    pub const FRAGMENT_SIZE_RATIO: f32 = 0.75;
    /// Polygon radius of a size-1 asteroid, in pixels
    pub const ASTEROID_UNIT_RADIUS: f32 = 16.0;

    /// Minimum initial distance between an asteroid and the spaceship
    pub const STARTING_SECURITY_DISTANCE: f32 = 80.0;
    /// Retry budget for initial-placement rejection sampling
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

    /// Projectile lifetime in seconds
    pub const PROJECTILE_LIFETIME: f32 = 10.0;
    /// Distance from ship center to the muzzle
    pub const NOSE_OFFSET: f32 = 30.0;
    /// Muzzle velocity added on top of the ship's own
    pub const MUZZLE_SPEED: f32 = 100.0;

    /// Forward thrust of the main engine
    pub const MAIN_ENGINE_POWER: f32 = 45.0;
    /// Reverse thrust of the recoil engine (opposes facing direction)
    pub const RECOIL_ENGINE_POWER: f32 = -45.0;
    /// Turn rate of a lateral engine, degrees per second
    pub const LATERAL_ANGULAR_RATE: f32 = 360.0;
    /// Fuel tank capacity
    pub const TANK_CAPACITY: f32 = 5.0;
    /// Fuel recharged per second while idle
    pub const FUEL_RECHARGE_RATE: f32 = 0.2;
    /// Fuel burned per second by the main engine
    pub const MAIN_ENGINE_CONSUMPTION: f32 = 1.0;
    /// Fuel burned per second while either lateral engine is on
    pub const LATERAL_ENGINE_CONSUMPTION: f32 = 0.3;
    /// Fuel burned per second by the recoil engine
    pub const RECOIL_ENGINE_CONSUMPTION: f32 = 0.5;

    /// Spaceship lives at game start
    pub const STARTING_LIVES: u32 = 3;
    /// Spawn-protection invulnerability granted at game start, seconds
    pub const SPAWN_INVULNERABILITY: f32 = 5.0;
    /// Invulnerability granted after an asteroid collision, seconds
    pub const COLLISION_INVULNERABILITY: f32 = 3.0;

    /// Points awarded per asteroid hit (before multiplier)
    pub const POINTS_PER_HIT: u64 = 10;
    /// Multiplier gained per hit
    pub const MULTIPLIER_STEP: u32 = 1;
    /// Seconds without a hit before the multiplier starts decaying
    pub const MULTIPLIER_REBOOT_TIME: f32 = 3.0;
}

/// Rotate a vector about the origin by `deg` degrees, counter-clockwise
#[inline]
pub fn rotate_deg(v: Vec2, deg: f32) -> Vec2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Heading of a vector in degrees, where +x is 0 and +y is 90
#[inline]
pub fn angle_deg(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}
