//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, validated at the `Space::update` boundary
//! - Seeded RNG only, owned by the [`spawn::Spawner`]
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod geom;
pub mod projectile;
pub mod score;
pub mod ship;
pub mod space;
pub mod spawn;

pub use asteroid::Asteroid;
pub use geom::Polygon;
pub use projectile::Projectile;
pub use score::Score;
pub use ship::Spaceship;
pub use space::{Space, UpdateError, toric_remap};
pub use spawn::Spawner;
