//! Top-level game state and tick pipeline
//!
//! [`Space`] owns every entity and is the single source of truth for the
//! game. Each `update(dt)` call runs a fixed pipeline: projectile motion
//! and hit resolution, score decay, asteroid and ship motion, then
//! ship/asteroid collision detection. The collision result is recorded as
//! a flag on the ship and consumed by the *next* tick's ship update, so a
//! hull hit costs a life one tick after detection. That lag is a property
//! of the pipeline order and is covered by tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asteroid::Asteroid;
use super::projectile::Projectile;
use super::score::Score;
use super::ship::Spaceship;
use super::spawn::Spawner;
use crate::consts::*;

/// Rejected input to [`Space::update`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UpdateError {
    /// The caller-supplied time delta was negative, NaN or infinite.
    /// Deltas are untrusted input; silently clamping them would mask
    /// caller bugs.
    #[error("invalid time step {0}: must be finite and non-negative")]
    InvalidTimeStep(f32),
}

/// Map a position into canonical toric coordinates.
///
/// Each coordinate lands in `[0, bound)` via `v - floor(v / bound) * bound`,
/// which wraps negative values correctly where a plain remainder would not.
/// Idempotent.
pub fn toric_remap(position: Vec2) -> Vec2 {
    Vec2::new(
        wrap(position.x, SPACE_WIDTH),
        wrap(position.y, SPACE_HEIGHT),
    )
}

fn wrap(value: f32, bound: f32) -> f32 {
    let wrapped = value - (value / bound).floor() * bound;
    // Tiny negative inputs round to exactly `bound`; fold them back so the
    // result always stays in [0, bound)
    if wrapped >= bound { wrapped - bound } else { wrapped }
}

/// The complete, serializable game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    spaceship: Spaceship,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    score: Score,
    spawner: Spawner,
}

impl Space {
    /// Start a new game: ship centered with spawn protection, score
    /// zeroed, and the initial asteroid field placed away from the ship.
    pub fn new(seed: u64) -> Self {
        let spaceship = Spaceship::new();
        let mut spawner = Spawner::new(seed);

        let mut asteroids = Vec::with_capacity(INITIAL_ASTEROID_COUNT);
        for _ in 0..INITIAL_ASTEROID_COUNT {
            asteroids.push(place_initial_asteroid(&mut spawner, spaceship.position()));
        }

        Self {
            spaceship,
            asteroids,
            projectiles: Vec::new(),
            score: Score::new(),
            spawner,
        }
    }

    pub fn spaceship(&self) -> &Spaceship {
        &self.spaceship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.spaceship.life() == 0
    }

    /// Advance the whole simulation by `dt` seconds.
    ///
    /// The pipeline order is fixed: projectiles move and resolve hits
    /// first, then the score multiplier decays, then asteroids and the
    /// ship move, and finally the ship is tested against every asteroid.
    pub fn update(&mut self, dt: f32) -> Result<(), UpdateError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(UpdateError::InvalidTimeStep(dt));
        }
        let was_over = self.is_game_over();

        self.process_projectiles(dt);
        self.score.update(dt);

        for asteroid in &mut self.asteroids {
            asteroid.update(dt);
        }
        self.spaceship.update(dt);

        self.detect_ship_collision();

        if !was_over && self.is_game_over() {
            log::info!("game over with score {}", self.score.value());
        }
        Ok(())
    }

    /// Step 1 of the pipeline: advance projectiles, resolve hits, remove
    /// destroyed entities, spawn fragments, drop expired projectiles.
    fn process_projectiles(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }

        // Explicit list of (projectile, asteroid) contact events. A
        // projectile overlapping several asteroids produces one event,
        // and one score bump, per asteroid.
        let mut events = Vec::new();
        for (pi, projectile) in self.projectiles.iter().enumerate() {
            for (ai, asteroid) in self.asteroids.iter().enumerate() {
                if projectile.hits(asteroid) {
                    events.push((pi, ai));
                }
            }
        }

        let mut hit_projectiles = vec![false; self.projectiles.len()];
        let mut hit_asteroids = vec![false; self.asteroids.len()];
        for &(pi, ai) in &events {
            self.score.add_multiplier(MULTIPLIER_STEP);
            self.score.notify_hit(POINTS_PER_HIT);
            self.score.reset_decay_timer(MULTIPLIER_REBOOT_TIME);
            hit_projectiles[pi] = true;
            hit_asteroids[ai] = true;
        }
        if !events.is_empty() {
            log::debug!(
                "{} projectile hit(s), multiplier now x{}, score {}",
                events.len(),
                self.score.multiplier(),
                self.score.value()
            );
        }

        let mut index = 0;
        self.projectiles.retain(|_| {
            let keep = !hit_projectiles[index];
            index += 1;
            keep
        });

        // Pull destroyed asteroids out in order, then append their
        // surviving fragments to the field
        let mut destroyed = Vec::new();
        let mut kept = Vec::with_capacity(self.asteroids.len());
        for (ai, asteroid) in self.asteroids.drain(..).enumerate() {
            if hit_asteroids[ai] {
                destroyed.push(asteroid);
            } else {
                kept.push(asteroid);
            }
        }
        self.asteroids = kept;
        for asteroid in &destroyed {
            let fragments = asteroid.fragments(&mut self.spawner);
            log::debug!(
                "asteroid of size {:.2} destroyed, {} fragment(s)",
                asteroid.size(),
                fragments.len()
            );
            self.asteroids.extend(fragments);
        }

        self.projectiles.retain(Projectile::is_alive);
    }

    /// Step 4 of the pipeline: record whether any asteroid touches the
    /// hull this tick. The flag is consumed by the next ship update; a
    /// fresh hit also grants a short invulnerability window.
    fn detect_ship_collision(&mut self) {
        let hit = self
            .asteroids
            .iter()
            .any(|asteroid| self.spaceship.contact(asteroid));
        self.spaceship.set_collided(hit);
        if hit {
            self.spaceship.invulnerate(COLLISION_INVULNERABILITY);
        }
    }

    // Command surface, forwarded from the input layer. Commands only flip
    // engine flags or spawn a projectile; nothing moves until the next
    // `update` call.

    pub fn start_main_engine(&mut self) {
        self.spaceship.start_main_engine();
    }

    pub fn stop_main_engine(&mut self) {
        self.spaceship.stop_main_engine();
    }

    pub fn start_recoil_engine(&mut self) {
        self.spaceship.start_recoil_engine();
    }

    pub fn stop_recoil_engine(&mut self) {
        self.spaceship.stop_recoil_engine();
    }

    pub fn start_left_lateral_engine(&mut self) {
        self.spaceship.start_left_lateral_engine();
    }

    pub fn stop_left_lateral_engine(&mut self) {
        self.spaceship.stop_left_lateral_engine();
    }

    pub fn start_right_lateral_engine(&mut self) {
        self.spaceship.start_right_lateral_engine();
    }

    pub fn stop_right_lateral_engine(&mut self) {
        self.spaceship.stop_right_lateral_engine();
    }

    /// Fire the weapon: a new projectile leaves the ship's nose
    pub fn fire(&mut self) {
        self.projectiles.push(self.spaceship.fire());
    }
}

/// Rejection-sample an initial asteroid position away from the ship.
///
/// Retries are bounded; on an exhausted budget the last candidate is
/// accepted so construction always terminates, even on a playfield too
/// small for the security distance.
fn place_initial_asteroid(spawner: &mut Spawner, ship_position: Vec2) -> Asteroid {
    let mut candidate = spawner.asteroid(INITIAL_ASTEROID_SIZE);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if candidate.position.distance(ship_position) >= STARTING_SECURITY_DISTANCE {
            return candidate;
        }
        candidate = spawner.asteroid(INITIAL_ASTEROID_SIZE);
    }
    if candidate.position.distance(ship_position) < STARTING_SECURITY_DISTANCE {
        log::warn!("asteroid placement retry budget exhausted, accepting close candidate");
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Polygon;
    use proptest::prelude::*;

    /// A big stationary square asteroid centered at `center`
    fn block_asteroid(center: Vec2, size: f32) -> Asteroid {
        let shape = Polygon::new(vec![
            Vec2::new(-40.0, -40.0),
            Vec2::new(40.0, -40.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(-40.0, 40.0),
        ]);
        Asteroid::new(center, shape, Vec2::ZERO, 0.0, size)
    }

    /// A space with no asteroids and the spawn protection already lapsed
    fn cleared_space() -> Space {
        let mut space = Space::new(99);
        space.asteroids.clear();
        space.update(SPAWN_INVULNERABILITY + 1.0).unwrap();
        space
    }

    #[test]
    fn test_initial_state() {
        let space = Space::new(1);
        assert_eq!(space.asteroids().len(), INITIAL_ASTEROID_COUNT);
        assert!(space.projectiles().is_empty());
        assert_eq!(space.score().value(), 0);
        assert_eq!(space.score().multiplier(), 1);
        assert!(!space.is_game_over());
        let center = Vec2::new(SPACE_WIDTH / 2.0, SPACE_HEIGHT / 2.0);
        assert_eq!(space.spaceship().position(), center);
    }

    #[test]
    fn test_initial_asteroids_respect_security_distance() {
        for seed in 0..20 {
            let space = Space::new(seed);
            for asteroid in space.asteroids() {
                let distance = asteroid.position.distance(space.spaceship().position());
                assert!(
                    distance >= STARTING_SECURITY_DISTANCE,
                    "seed {seed}: asteroid at distance {distance}"
                );
            }
        }
    }

    #[test]
    fn test_update_rejects_invalid_dt() {
        let mut space = Space::new(1);
        assert_eq!(
            space.update(-0.1),
            Err(UpdateError::InvalidTimeStep(-0.1))
        );
        assert!(space.update(f32::NAN).is_err());
        assert!(space.update(f32::INFINITY).is_err());
        assert!(space.update(0.0).is_ok());
    }

    #[test]
    fn test_toric_remap_wraps_negatives() {
        let remapped = toric_remap(Vec2::new(-10.0, 850.0));
        assert!((remapped.x - 790.0).abs() < 1e-3);
        assert!((remapped.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_toric_remap_folds_tiny_negatives_back_into_bounds() {
        // `-1e-7 + 800.0` rounds to exactly 800.0 in f32; the wrap must
        // fold that back below the bound
        let remapped = toric_remap(Vec2::new(-1e-7, -1e-7));
        assert!(remapped.x >= 0.0 && remapped.x < SPACE_WIDTH);
        assert!(remapped.y >= 0.0 && remapped.y < SPACE_HEIGHT);
        assert_eq!(toric_remap(remapped), remapped);
    }

    #[test]
    fn test_fire_has_no_effect_until_update() {
        let mut space = cleared_space();
        space.fire();
        assert_eq!(space.projectiles().len(), 1);
        let spawned_at = space.projectiles()[0].position;
        space.update(0.1).unwrap();
        assert!(space.projectiles()[0].position != spawned_at);
    }

    #[test]
    fn test_projectile_hit_scores_and_fragments() {
        let mut space = cleared_space();
        let target = space.spaceship().position() + Vec2::new(200.0, 0.0);
        space
            .asteroids
            .push(block_asteroid(target, INITIAL_ASTEROID_SIZE));

        space.fire();
        // Projectile travels at 100 px/s from the nose at +30; give it
        // enough ticks to cross into the asteroid
        let mut hit_tick = None;
        for tick in 0..40 {
            space.update(0.05).unwrap();
            if space.asteroids().iter().all(|a| a.size() != INITIAL_ASTEROID_SIZE) {
                hit_tick = Some(tick);
                break;
            }
        }
        assert!(hit_tick.is_some(), "projectile never hit the asteroid");

        // One hit: multiplier bumped to 2 before scoring
        assert_eq!(space.score().multiplier(), 2);
        assert_eq!(space.score().value(), 2 * POINTS_PER_HIT);
        assert!(space.projectiles().is_empty());
        // Full-size asteroid breaks into limit-size fragments
        assert_eq!(space.asteroids().len(), ASTEROID_FRAGMENT_COUNT);
        for fragment in space.asteroids() {
            assert_eq!(fragment.size(), LIMIT_ASTEROID_SIZE);
        }
    }

    #[test]
    fn test_limit_size_asteroid_vanishes_without_fragments() {
        let mut space = cleared_space();
        let target = space.spaceship().position() + Vec2::new(200.0, 0.0);
        space
            .asteroids
            .push(block_asteroid(target, LIMIT_ASTEROID_SIZE));

        space.projectiles.push(Projectile::new(target, Vec2::ZERO));
        space.update(0.01).unwrap();
        assert!(space.asteroids().is_empty());
    }

    #[test]
    fn test_two_hits_inside_window_raise_multiplier_twice() {
        let mut space = cleared_space();
        let ship_position = space.spaceship().position();
        let first = ship_position + Vec2::new(200.0, 0.0);
        let second = ship_position + Vec2::new(200.0, 200.0);
        space
            .asteroids
            .push(block_asteroid(first, LIMIT_ASTEROID_SIZE));
        space
            .asteroids
            .push(block_asteroid(second, LIMIT_ASTEROID_SIZE));

        space.projectiles.push(Projectile::new(first, Vec2::ZERO));
        space.update(0.01).unwrap();
        assert_eq!(space.score().multiplier(), 2);

        // Second hit lands one second later, well inside the 3 s window
        space.update(1.0).unwrap();
        space.projectiles.push(Projectile::new(second, Vec2::ZERO));
        space.update(0.01).unwrap();
        assert_eq!(space.score().multiplier(), 3);
        assert_eq!(space.score().value(), 2 * POINTS_PER_HIT + 3 * POINTS_PER_HIT);
    }

    #[test]
    fn test_projectile_overlapping_two_asteroids_scores_twice() {
        let mut space = cleared_space();
        let spot = space.spaceship().position() + Vec2::new(200.0, 0.0);
        // Two overlapping limit-size asteroids around the same point
        space
            .asteroids
            .push(block_asteroid(spot, LIMIT_ASTEROID_SIZE));
        space
            .asteroids
            .push(block_asteroid(spot + Vec2::new(10.0, 0.0), LIMIT_ASTEROID_SIZE));

        space.projectiles.push(Projectile::new(spot, Vec2::ZERO));
        space.update(0.01).unwrap();

        // Two contact events from one projectile: scored once per asteroid
        assert_eq!(space.score().multiplier(), 3);
        assert_eq!(space.score().value(), 2 * POINTS_PER_HIT + 3 * POINTS_PER_HIT);
        assert!(space.asteroids().is_empty());
        assert!(space.projectiles().is_empty());
    }

    #[test]
    fn test_expired_projectiles_are_removed() {
        let mut space = cleared_space();
        space.fire();
        space.update(PROJECTILE_LIFETIME + 0.1).unwrap();
        assert!(space.projectiles().is_empty());
    }

    #[test]
    fn test_collision_costs_life_one_tick_later() {
        let mut space = cleared_space();
        assert_eq!(space.spaceship().life(), STARTING_LIVES);

        space
            .asteroids
            .push(block_asteroid(space.spaceship().position(), LIMIT_ASTEROID_SIZE));

        // Detection tick: the flag and the invulnerability window are set,
        // but the life is not lost yet
        space.update(0.016).unwrap();
        assert_eq!(space.spaceship().life(), STARTING_LIVES);
        assert!(space.spaceship().is_invulnerable());
        assert!(
            (space.spaceship().invulnerability_time() - COLLISION_INVULNERABILITY).abs() < 1e-5
        );

        // Next tick consumes the flag
        space.update(0.016).unwrap();
        assert_eq!(space.spaceship().life(), STARTING_LIVES - 1);

        // Invulnerability suppresses re-detection; no further losses
        space.update(0.016).unwrap();
        assert_eq!(space.spaceship().life(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_game_over_after_losing_all_lives() {
        let mut space = cleared_space();
        for _ in 0..STARTING_LIVES {
            space.spaceship.set_collided(true);
            space.update(0.016).unwrap();
        }
        assert!(space.is_game_over());

        // Extra ticks never push life below zero
        space.spaceship.set_collided(true);
        space.update(0.016).unwrap();
        assert!(space.is_game_over());
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = |space: &mut Space| {
            space.start_main_engine();
            space.update(0.5).unwrap();
            space.fire();
            space.start_left_lateral_engine();
            for _ in 0..20 {
                space.update(0.05).unwrap();
            }
        };

        let mut a = Space::new(1234);
        let mut b = Space::new(1234);
        script(&mut a);
        script(&mut b);

        let left = serde_json::to_string(&a).unwrap();
        let right = serde_json::to_string(&b).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_snapshot_round_trip_replays_identically() {
        let mut space = Space::new(77);
        space.start_main_engine();
        space.update(0.25).unwrap();

        let snapshot = serde_json::to_string(&space).unwrap();
        let mut restored: Space = serde_json::from_str(&snapshot).unwrap();

        space.fire();
        restored.fire();
        for _ in 0..10 {
            space.update(0.05).unwrap();
            restored.update(0.05).unwrap();
        }
        assert_eq!(
            serde_json::to_string(&space).unwrap(),
            serde_json::to_string(&restored).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_toric_remap_lands_in_bounds(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let remapped = toric_remap(Vec2::new(x, y));
            prop_assert!(remapped.x >= 0.0 && remapped.x < SPACE_WIDTH);
            prop_assert!(remapped.y >= 0.0 && remapped.y < SPACE_HEIGHT);
        }

        #[test]
        fn prop_toric_remap_is_idempotent(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let once = toric_remap(Vec2::new(x, y));
            prop_assert_eq!(toric_remap(once), once);
        }

        #[test]
        fn prop_fuel_and_multiplier_invariants(
            commands in proptest::collection::vec(0u8..9, 1..60),
            dts in proptest::collection::vec(0.0f32..2.0, 1..60),
        ) {
            let mut space = Space::new(42);
            for (&command, &dt) in commands.iter().zip(&dts) {
                match command {
                    0 => space.start_main_engine(),
                    1 => space.stop_main_engine(),
                    2 => space.start_recoil_engine(),
                    3 => space.stop_recoil_engine(),
                    4 => space.start_left_lateral_engine(),
                    5 => space.stop_left_lateral_engine(),
                    6 => space.start_right_lateral_engine(),
                    7 => space.stop_right_lateral_engine(),
                    _ => space.fire(),
                }
                space.update(dt).unwrap();
                let fuel = space.spaceship().fuel();
                prop_assert!((0.0..=TANK_CAPACITY).contains(&fuel));
                prop_assert!(space.score().multiplier() >= 1);
            }
        }
    }
}
