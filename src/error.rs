//! Error types for cable configuration and system lookups.
//!
//! The simulation loop itself never fails; everything here is raised either
//! while validating [`CableSettings`](crate::core::settings::CableSettings) or
//! when a [`CableSystem`](crate::world::CableSystem) is handed a stale id.

use thiserror::Error;

use crate::utils::allocator::CableId;

/// Main error type of the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CableError {
    #[error("cable length must be non-negative, got {0}")]
    InvalidLength(f32),
    #[error("segment count must be in [{min}, {max}], got {value}")]
    InvalidSegmentCount { value: usize, min: usize, max: usize },
    #[error("substep time must be in [{min}, {max}] seconds, got {value}")]
    InvalidSubstepTime { value: f32, min: f32, max: f32 },
    #[error("solver iterations must be in [{min}, {max}], got {value}")]
    InvalidSolverIterations { value: u32, min: u32, max: u32 },
    #[error("stiffness span must be at least 2, got {0}")]
    InvalidStiffnessSpan(usize),
    #[error("collision friction must be in [0, 1], got {0}")]
    InvalidFriction(f32),
    #[error("damping must be in [0, 1], got {0}")]
    InvalidDamping(f32),
    #[error("cable width must be in [{min}, {max}], got {value}")]
    InvalidWidth { value: f32, min: f32, max: f32 },
    #[error("side count must be in [{min}, {max}], got {value}")]
    InvalidSideCount { value: u32, min: u32, max: u32 },
    #[error("material tiling must be non-negative, got {0}")]
    InvalidTiling(f32),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("no cable registered for {0:?}")]
    UnknownCable(CableId),
}

/// Convenient Result alias for fallible cable operations.
pub type Result<T> = std::result::Result<T, CableError>;
