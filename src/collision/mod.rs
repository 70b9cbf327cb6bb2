//! Collision modules: sweep queries, a static collision world, and contact response.

pub mod queries;
pub mod response;
pub mod shapes;

pub use queries::{NoCollision, SphereSweep, SweepHit, SweepQuery};
pub use response::{collide_particles, resolve_contact};
pub use shapes::{StaticCollider, StaticCollisionWorld, StaticShape};
