//! Simulation dynamics: Verlet integration, constraint relaxation, and substep scheduling.

pub mod integrator;
pub mod scheduler;
pub mod solver;

pub use integrator::VerletIntegrator;
pub use scheduler::SubstepScheduler;
pub use solver::{ConstraintSolver, DistanceConstraint};
