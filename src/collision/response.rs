use crate::{
    collision::queries::{SphereSweep, SweepHit, SweepQuery},
    config::KINDA_SMALL_NUMBER,
    core::particle::CableParticle,
    utils::math::split_along_normal,
};

/// Moves a particle out of a blocking hit and rewrites its implicit velocity.
///
/// A swept hit places the particle at the contact point. The normal part of
/// the resulting movement is removed from the implied velocity and
/// `friction` of the tangential part is removed as well, so 0 keeps all
/// sliding motion and 1 stops it.
pub fn resolve_contact(particle: &mut CableParticle, hit: &SweepHit, friction: f32) {
    if hit.start_penetrating {
        particle.position += hit.normal * hit.penetration_depth;
    } else {
        particle.position = hit.location;
    }

    let (normal_delta, plane_delta) = split_along_normal(particle.displacement(), hit.normal);
    particle.previous_position += hit.normal * normal_delta;

    if friction > KINDA_SMALL_NUMBER {
        particle.previous_position += plane_delta * friction;
    }
}

/// Sweeps every free particle from its previous to its current position and
/// resolves blocking hits. Returns the number of particles that collided.
pub fn collide_particles(
    particles: &mut [CableParticle],
    query: &dyn SweepQuery,
    radius: f32,
    mask: u32,
    friction: f32,
) -> usize {
    let mut hits = 0;
    for particle in particles.iter_mut().filter(|p| p.is_free) {
        let sweep =
            SphereSweep::new(particle.previous_position, particle.position, radius).with_mask(mask);
        if let Some(hit) = query.sweep(&sweep) {
            resolve_contact(particle, &hit, friction);
            hits += 1;
        }
    }
    hits
}
