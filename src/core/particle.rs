use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single mass point along the cable.
///
/// Velocity is never stored; it is implied by `position - previous_position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableParticle {
    /// Simulated when true, pinned to an attachment point when false.
    pub is_free: bool,
    pub position: Vec3,
    pub previous_position: Vec3,
}

impl CableParticle {
    /// A free particle at rest.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            is_free: true,
            position,
            previous_position: position,
        }
    }

    /// Moves a pinned particle onto its attachment point, dropping any
    /// implicit velocity.
    pub fn snap_to(&mut self, position: Vec3) {
        self.position = position;
        self.previous_position = position;
    }

    /// Displacement over the last substep.
    pub fn displacement(&self) -> Vec3 {
        self.position - self.previous_position
    }
}

/// Builds `num_segments + 1` free particles evenly spaced on the line
/// from `start` to `end`.
pub fn particles_along_line(start: Vec3, end: Vec3, num_segments: usize) -> Vec<CableParticle> {
    let segments = num_segments.max(1);
    (0..=segments)
        .map(|i| {
            let alpha = i as f32 / segments as f32;
            CableParticle::at_rest(start.lerp(end, alpha))
        })
        .collect()
}
