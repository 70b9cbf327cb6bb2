//! Core types describing cable particles, settings, and render geometry.

pub mod mesh;
pub mod particle;
pub mod settings;
pub mod types;

pub use mesh::{CableMesh, CableVertex};
pub use particle::CableParticle;
pub use settings::{CableSettings, CableSettingsBuilder, RenderSettings};
pub use types::{Aabb, Transform};
