use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere swept along a straight segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSweep {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    /// Only colliders whose layer intersects this mask are considered.
    pub mask: u32,
}

impl SphereSweep {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self {
            start,
            end,
            radius,
            mask: u32::MAX,
        }
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Blocking hit reported by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepHit {
    /// Sphere center at the moment of contact.
    pub location: Vec3,
    /// Surface normal pointing away from the obstacle.
    pub normal: Vec3,
    /// Fraction of the sweep travelled before contact, in [0, 1].
    pub time: f32,
    /// True when the sphere already overlapped the obstacle at `start`.
    pub start_penetrating: bool,
    /// Distance to push out along `normal`; only set when start-penetrating.
    pub penetration_depth: f32,
}

impl SweepHit {
    /// Keeps the earlier of two hits; for overlaps at the start, the deeper one.
    pub fn closer(self, other: SweepHit) -> SweepHit {
        if (other.time, -other.penetration_depth) < (self.time, -self.penetration_depth) {
            other
        } else {
            self
        }
    }
}

/// World collision capability injected into the cable simulation.
///
/// Implementations must be shareable across threads so independent cables
/// can be ticked in parallel against the same world.
pub trait SweepQuery: Send + Sync {
    /// Returns the first blocking hit along the sweep, if any.
    fn sweep(&self, sweep: &SphereSweep) -> Option<SweepHit>;
}

/// A world with nothing in it. Sweeps never hit.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCollision;

impl SweepQuery for NoCollision {
    fn sweep(&self, _sweep: &SphereSweep) -> Option<SweepHit> {
        None
    }
}
