use glam::Vec3;

use crate::core::particle::CableParticle;

/// Position-Verlet integrator stepping cable particles forward in time.
#[derive(Debug, Clone, Copy)]
pub struct VerletIntegrator {
    /// Fraction of the implicit velocity kept each substep.
    pub damping: f32,
}

impl Default for VerletIntegrator {
    fn default() -> Self {
        Self { damping: 1.0 }
    }
}

impl VerletIntegrator {
    pub fn new(damping: f32) -> Self {
        Self {
            damping: damping.clamp(0.0, 1.0),
        }
    }

    pub fn integrate_particle(&self, particle: &mut CableParticle, acceleration: Vec3, dt_sq: f32) {
        if !particle.is_free {
            return;
        }

        let velocity = particle.displacement() * self.damping;
        let new_position = particle.position + velocity + acceleration * dt_sq;
        particle.previous_position = particle.position;
        particle.position = new_position;
    }

    /// Advances every free particle by one substep of length `dt`.
    pub fn step(&self, particles: &mut [CableParticle], acceleration: Vec3, dt: f32) {
        let dt_sq = dt * dt;
        for particle in particles.iter_mut() {
            self.integrate_particle(particle, acceleration, dt_sq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn free_particle_accelerates_under_gravity() {
        let integrator = VerletIntegrator::default();
        let mut particles = [CableParticle::at_rest(Vec3::ZERO)];
        let gravity = Vec3::new(0.0, -10.0, 0.0);

        integrator.step(&mut particles, gravity, 0.1);
        assert_relative_eq!(particles[0].position.y, -0.1, epsilon = 1e-6);
        integrator.step(&mut particles, gravity, 0.1);
        // Implicit velocity carries over: -0.1 + (-0.1) + (-0.1).
        assert_relative_eq!(particles[0].position.y, -0.3, epsilon = 1e-6);
        assert_relative_eq!(particles[0].previous_position.y, -0.1, epsilon = 1e-6);
    }

    #[test]
    fn pinned_particle_is_untouched() {
        let integrator = VerletIntegrator::default();
        let mut particle = CableParticle::at_rest(Vec3::ONE);
        particle.is_free = false;
        let mut particles = [particle];
        integrator.step(&mut particles, Vec3::new(0.0, -1000.0, 0.0), 0.02);
        assert_eq!(particles[0].position, Vec3::ONE);
    }

    #[test]
    fn zero_damping_discards_velocity() {
        let integrator = VerletIntegrator::new(0.0);
        let mut particle = CableParticle::at_rest(Vec3::ZERO);
        particle.previous_position = Vec3::new(-1.0, 0.0, 0.0);
        let mut particles = [particle];
        integrator.step(&mut particles, Vec3::ZERO, 0.02);
        assert_eq!(particles[0].position, Vec3::ZERO);
    }
}
