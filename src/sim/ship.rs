//! The player-controlled spaceship
//!
//! Four independently switched thrusters draw from a shared self-recharging
//! fuel tank. Thrust physics is deliberately arcade-simple: the ship only
//! holds velocity while the main or recoil engine is firing, and stops dead
//! otherwise. Collision testing uses a fixed table of hull contact points
//! instead of polygon-polygon sweeps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::projectile::Projectile;
use super::space::toric_remap;
use crate::consts::*;
use crate::{angle_deg, rotate_deg};

/// Hull outline points, in local coordinates with the nose toward +x.
/// Collision with an asteroid means at least one of these, rotated to the
/// current facing and translated to the ship's position, falls inside the
/// asteroid's polygon.
const CONTACT_POINTS: [Vec2; 12] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(27.0, 0.0),
    Vec2::new(14.5, 1.5),
    Vec2::new(2.0, 3.0),
    Vec2::new(0.0, 18.0),
    Vec2::new(-13.0, 18.0),
    Vec2::new(-14.0, 2.0),
    Vec2::new(-14.0, -2.0),
    Vec2::new(-13.0, -18.0),
    Vec2::new(0.0, -18.0),
    Vec2::new(2.0, -3.0),
    Vec2::new(14.5, -1.5),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaceship {
    position: Vec2,
    velocity: Vec2,
    /// Facing as a unit vector; encodes both the sprite rotation and the
    /// thrust axis
    direction: Vec2,
    /// Fuel in the tank, always within `[0, TANK_CAPACITY]`
    fuel: f32,
    main_engine_on: bool,
    recoil_engine_on: bool,
    left_lateral_engine_on: bool,
    right_lateral_engine_on: bool,
    /// Remaining invulnerability, seconds
    invulnerability_timer: f32,
    life: u32,
    /// Set by the orchestrator when the hull overlapped an asteroid this
    /// tick; consumed (life lost) by the next `update` call
    collided: bool,
}

impl Default for Spaceship {
    /// A fresh ship at the center of the playfield, facing +x, with a full
    /// tank and a short spawn-protection window
    fn default() -> Self {
        Self {
            position: Vec2::new(SPACE_WIDTH / 2.0, SPACE_HEIGHT / 2.0),
            velocity: Vec2::ZERO,
            direction: Vec2::X,
            fuel: TANK_CAPACITY,
            main_engine_on: false,
            recoil_engine_on: false,
            left_lateral_engine_on: false,
            right_lateral_engine_on: false,
            invulnerability_timer: SPAWN_INVULNERABILITY,
            life: STARTING_LIVES,
            collided: false,
        }
    }
}

impl Spaceship {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Facing in degrees, 0 pointing right
    pub fn direction_angle(&self) -> f32 {
        angle_deg(self.direction)
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn fuel_percentage(&self) -> f32 {
        self.fuel * 100.0 / TANK_CAPACITY
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_timer > 0.0
    }

    pub fn invulnerability_time(&self) -> f32 {
        self.invulnerability_timer
    }

    pub fn is_main_engine_on(&self) -> bool {
        self.main_engine_on
    }

    pub fn is_recoil_engine_on(&self) -> bool {
        self.recoil_engine_on
    }

    pub fn is_left_lateral_engine_on(&self) -> bool {
        self.left_lateral_engine_on
    }

    pub fn is_right_lateral_engine_on(&self) -> bool {
        self.right_lateral_engine_on
    }

    /// Thrust from the forward/reverse engines along the facing axis
    pub fn acceleration(&self) -> Vec2 {
        if self.main_engine_on {
            self.direction * MAIN_ENGINE_POWER
        } else if self.recoil_engine_on {
            self.direction * RECOIL_ENGINE_POWER
        } else {
            Vec2::ZERO
        }
    }

    /// Net fuel drain per second; negative while idle (the tank recharges)
    pub fn current_consumption(&self) -> f32 {
        let mut rate = -FUEL_RECHARGE_RATE;
        if self.main_engine_on {
            rate += MAIN_ENGINE_CONSUMPTION;
        }
        if self.left_lateral_engine_on || self.right_lateral_engine_on {
            rate += LATERAL_ENGINE_CONSUMPTION;
        }
        if self.recoil_engine_on {
            rate += RECOIL_ENGINE_CONSUMPTION;
        }
        rate
    }

    fn any_engine_on(&self) -> bool {
        self.main_engine_on
            || self.recoil_engine_on
            || self.left_lateral_engine_on
            || self.right_lateral_engine_on
    }

    /// The fraction of this tick the ship can sustain its current thrust
    /// before the tank runs dry, clamped to `dt`. Unconstrained while
    /// every engine is off.
    pub fn autonomy(&self, dt: f32) -> f32 {
        if !self.any_engine_on() {
            dt
        } else {
            (self.fuel / self.current_consumption()).min(dt)
        }
    }

    /// Thrusting accelerates along the facing axis; without forward or
    /// reverse thrust the ship stops dead. No coasting is intentional
    /// arcade physics, not an oversight.
    fn update_velocity(&mut self, dt: f32) {
        if self.main_engine_on || self.recoil_engine_on {
            self.velocity += self.acceleration() * self.autonomy(dt);
        } else {
            self.velocity = Vec2::ZERO;
        }
    }

    /// Lateral engines turn the facing vector; both at once cancel out
    fn update_direction(&mut self, dt: f32) {
        if self.left_lateral_engine_on {
            self.direction = rotate_deg(self.direction, LATERAL_ANGULAR_RATE * self.autonomy(dt));
        }
        if self.right_lateral_engine_on {
            self.direction = rotate_deg(self.direction, -LATERAL_ANGULAR_RATE * self.autonomy(dt));
        }
    }

    /// Advance the ship by `dt` seconds: velocity, position (with toric
    /// wrap), facing, fuel, invulnerability, and finally the collision
    /// flag left by the previous tick's detection pass.
    pub fn update(&mut self, dt: f32) {
        self.update_velocity(dt);
        self.position = toric_remap(self.position + self.velocity * dt);
        self.update_direction(dt);

        let burned = self.current_consumption() * self.autonomy(dt);
        self.fuel = (self.fuel - burned).clamp(0.0, TANK_CAPACITY);

        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer -= dt;
        }
        if self.collided {
            self.life = self.life.saturating_sub(1);
            self.collided = false;
        }
    }

    /// Grant invulnerability for `duration` seconds. An already-running
    /// window is extended to the larger of the two, never summed.
    pub fn invulnerate(&mut self, duration: f32) {
        if self.is_invulnerable() {
            self.invulnerability_timer = self.invulnerability_timer.max(duration);
        } else {
            self.invulnerability_timer = duration;
        }
    }

    /// Whether any hull contact point currently falls inside the asteroid.
    /// Always false while invulnerable. Pure query: the per-tick collision
    /// flag is set once by the orchestrator from the aggregate result.
    pub fn contact(&self, asteroid: &Asteroid) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        let facing = self.direction_angle();
        CONTACT_POINTS
            .iter()
            .any(|&p| asteroid.contains(rotate_deg(p, facing) + self.position))
    }

    pub(super) fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    /// Spawn a projectile at the nose, inheriting the ship's momentum
    pub fn fire(&self) -> Projectile {
        Projectile::new(
            self.position + self.direction * NOSE_OFFSET,
            self.velocity + self.direction * MUZZLE_SPEED,
        )
    }

    // Engine switches. Starting is refused on an empty tank; stopping
    // always succeeds.

    pub fn start_main_engine(&mut self) {
        self.main_engine_on = self.fuel != 0.0;
    }

    pub fn stop_main_engine(&mut self) {
        self.main_engine_on = false;
    }

    pub fn start_recoil_engine(&mut self) {
        self.recoil_engine_on = self.fuel != 0.0;
    }

    pub fn stop_recoil_engine(&mut self) {
        self.recoil_engine_on = false;
    }

    pub fn start_left_lateral_engine(&mut self) {
        self.left_lateral_engine_on = self.fuel != 0.0;
    }

    pub fn stop_left_lateral_engine(&mut self) {
        self.left_lateral_engine_on = false;
    }

    pub fn start_right_lateral_engine(&mut self) {
        self.right_lateral_engine_on = self.fuel != 0.0;
    }

    pub fn stop_right_lateral_engine(&mut self) {
        self.right_lateral_engine_on = false;
    }
}
