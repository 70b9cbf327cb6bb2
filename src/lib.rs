//! Cable Sim – Verlet rope simulation for Rust.
//!
//! A cable is an ordered chain of Verlet particles whose segment lengths are
//! enforced by iterative constraint relaxation. Cables advance in fixed-size
//! substeps independent of the caller's frame rate, can optionally sweep
//! against a collision world with friction, and expose read-only snapshots
//! and a tube mesh for rendering.

pub mod cable;
pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Quat, Vec3};

pub use cable::{CableComponent, SimulationContext, SimulationState};
pub use collision::{
    queries::{NoCollision, SphereSweep, SweepHit, SweepQuery},
    shapes::{StaticCollider, StaticCollisionWorld, StaticShape},
};
pub use crate::core::{
    mesh::{CableMesh, CableVertex},
    particle::CableParticle,
    settings::{CableSettings, CableSettingsBuilder, RenderSettings},
    types::{Aabb, Transform},
};
pub use dynamics::{ConstraintSolver, DistanceConstraint, SubstepScheduler, VerletIntegrator};
pub use error::{CableError, Result};
pub use utils::allocator::CableId;
pub use world::{
    attachments::{AttachmentRegistry, AttachmentResolver, NoAttachments},
    snapshots::{CableSnapshot, SnapshotBuffer},
    CableSystem,
};
