use crate::{config::KINDA_SMALL_NUMBER, core::particle::CableParticle};

/// Rest-length constraint between two particles of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_length: f32,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_length: f32) -> Self {
        Self { a, b, rest_length }
    }

    /// Projects both endpoints toward `rest_length`. Free/free pairs split the
    /// correction around their midpoint; a pinned side pushes the whole
    /// correction onto the free one.
    pub fn solve(&self, particles: &mut [CableParticle]) {
        let (pa, pb) = (particles[self.a], particles[self.b]);
        let delta = pb.position - pa.position;
        let distance = delta.length();
        if distance < KINDA_SMALL_NUMBER {
            return;
        }

        let error_factor = (distance - self.rest_length) / distance;
        match (pa.is_free, pb.is_free) {
            (true, true) => {
                particles[self.a].position += delta * (error_factor * 0.5);
                particles[self.b].position -= delta * (error_factor * 0.5);
            }
            (true, false) => particles[self.a].position += delta * error_factor,
            (false, true) => particles[self.b].position -= delta * error_factor,
            (false, false) => {}
        }
    }

    /// Signed deviation from the rest length.
    pub fn error(&self, particles: &[CableParticle]) -> f32 {
        particles[self.a]
            .position
            .distance(particles[self.b].position)
            - self.rest_length
    }
}

/// Gauss-Seidel relaxation over the chain's segment and bending constraints.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSolver {
    segments: Vec<DistanceConstraint>,
    bending: Vec<DistanceConstraint>,
    pub iterations: u32,
}

impl ConstraintSolver {
    /// Builds constraints for `num_segments` segments of `segment_length`.
    /// A `stiffness_span` of `Some(k)` also links every particle `i` to
    /// `i + k` at `k * segment_length`.
    pub fn for_chain(
        num_segments: usize,
        segment_length: f32,
        stiffness_span: Option<usize>,
        iterations: u32,
    ) -> Self {
        let segments = (0..num_segments)
            .map(|i| DistanceConstraint::new(i, i + 1, segment_length))
            .collect();

        let bending = match stiffness_span {
            Some(span) if span >= 2 && span <= num_segments => (0..=num_segments - span)
                .map(|i| DistanceConstraint::new(i, i + span, segment_length * span as f32))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            segments,
            bending,
            iterations,
        }
    }

    pub fn segment_constraints(&self) -> &[DistanceConstraint] {
        &self.segments
    }

    pub fn bending_constraints(&self) -> &[DistanceConstraint] {
        &self.bending
    }

    pub fn solve(&self, particles: &mut [CableParticle]) {
        for _ in 0..self.iterations {
            for constraint in &self.segments {
                constraint.solve(particles);
            }
            for constraint in &self.bending {
                constraint.solve(particles);
            }
        }
    }

    /// Largest absolute segment length deviation.
    pub fn max_segment_error(&self, particles: &[CableParticle]) -> f32 {
        self.segments
            .iter()
            .map(|c| c.error(particles).abs())
            .fold(0.0, f32::max)
    }

    /// Sum of absolute segment length deviations.
    pub fn total_segment_error(&self, particles: &[CableParticle]) -> f32 {
        self.segments.iter().map(|c| c.error(particles).abs()).sum()
    }
}
