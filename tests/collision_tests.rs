use approx::assert_relative_eq;
use cable_sim::*;

const RADIUS: f32 = 1.0;

fn slack_cable(friction: f32, mask: u32) -> CableComponent {
    let settings = CableSettings::builder()
        .length(120.0)
        .solver_iterations(4)
        .gravity_scale(10.0)
        .collision(true, friction)
        .collision_mask(mask)
        .width(2.0 * RADIUS)
        .build()
        .unwrap();
    CableComponent::new(settings, Transform::default()).unwrap()
}

fn run(cable: &mut CableComponent, world: &StaticCollisionWorld, substeps: usize) {
    let ctx = SimulationContext::new(Vec3::new(0.0, -9.81, 0.0), world, &NoAttachments);
    for _ in 0..substeps {
        cable.substep(&ctx);
    }
}

fn free_positions(cable: &CableComponent) -> Vec<Vec3> {
    cable
        .particles()
        .iter()
        .filter(|p| p.is_free)
        .map(|p| p.position)
        .collect()
}

#[test]
fn cable_drapes_on_plane_without_sinking() {
    let mut world = StaticCollisionWorld::new();
    world.add_shape(StaticShape::Plane {
        point: Vec3::new(0.0, -10.0, 0.0),
        normal: Vec3::Y,
    });

    let settings = CableSettings::builder()
        .solver_iterations(4)
        .gravity_scale(10.0)
        .collision(true, 0.2)
        .width(2.0 * RADIUS)
        .end_location(Vec3::new(50.0, 0.0, 0.0))
        .build()
        .unwrap();
    let mut cable = CableComponent::new(settings, Transform::default()).unwrap();

    let ctx = SimulationContext::new(Vec3::new(0.0, -9.81, 0.0), &world, &NoAttachments);
    for _ in 0..300 {
        cable.substep(&ctx);
        for p in free_positions(&cable) {
            assert!(p.y >= -10.0 + RADIUS - 2e-3, "particle sank to {p:?}");
        }
    }
    assert!(cable.profiler().collision_hits > 0);

    let lowest = free_positions(&cable)
        .iter()
        .map(|p| p.y)
        .fold(f32::INFINITY, f32::min);
    assert!(lowest < -8.9, "cable should rest on the plane, lowest y = {lowest}");
}

#[test]
fn cable_wraps_over_sphere() {
    let center = Vec3::new(50.0, -10.0, 0.0);
    let radius = 8.0;
    let mut world = StaticCollisionWorld::new();
    world.add_shape(StaticShape::Sphere { center, radius });

    let mut cable = slack_cable(0.2, u32::MAX);
    run(&mut cable, &world, 300);

    for p in free_positions(&cable) {
        assert!(
            p.distance(center) >= radius + RADIUS - 2e-3,
            "particle {p:?} is inside the sphere"
        );
    }
    assert!(cable.profiler().collision_hits > 0);
}

#[test]
fn cable_stays_outside_box() {
    let center = Vec3::new(50.0, -10.0, 0.0);
    let half_extents = Vec3::new(5.0, 8.0, 5.0);
    let mut world = StaticCollisionWorld::new();
    world.add_shape(StaticShape::Box {
        center,
        half_extents,
    });

    let mut cable = slack_cable(0.2, u32::MAX);
    run(&mut cable, &world, 300);

    let inflated = half_extents + Vec3::splat(RADIUS - 2e-3);
    for p in free_positions(&cable) {
        let local = (p - center).abs();
        assert!(
            !local.cmplt(inflated).all(),
            "particle {p:?} is inside the box"
        );
    }
    assert!(cable.profiler().collision_hits > 0);
}

#[test]
fn collision_mask_filters_layers() {
    let mut world = StaticCollisionWorld::new();
    world.add(
        StaticCollider::new(StaticShape::Plane {
            point: Vec3::new(0.0, -5.0, 0.0),
            normal: Vec3::Y,
        })
        .with_layer(0b10),
    );

    let mut ignored = slack_cable(0.2, 0b01);
    run(&mut ignored, &world, 200);
    assert_eq!(ignored.profiler().collision_hits, 0);
    assert!(free_positions(&ignored).iter().any(|p| p.y < -5.0));

    let mut blocked = slack_cable(0.2, 0b10);
    run(&mut blocked, &world, 200);
    assert!(blocked.profiler().collision_hits > 0);
    assert!(free_positions(&blocked)
        .iter()
        .all(|p| p.y >= -5.0 + RADIUS - 2e-3));
}

#[test]
fn disabled_collision_ignores_world() {
    let mut world = StaticCollisionWorld::new();
    world.add_shape(StaticShape::Plane {
        point: Vec3::new(0.0, -5.0, 0.0),
        normal: Vec3::Y,
    });

    let settings = CableSettings::builder()
        .length(120.0)
        .gravity_scale(10.0)
        .width(2.0 * RADIUS)
        .build()
        .unwrap();
    let mut cable = CableComponent::new(settings, Transform::default()).unwrap();
    run(&mut cable, &world, 200);
    assert!(free_positions(&cable).iter().any(|p| p.y < -5.0));
}

/// Every particle free, one unit above a ground plane at y = 0 (after the
/// radius), moving diagonally down at 0.25 per substep. Returns the middle
/// particle after nine substeps without gravity.
fn landing_position(friction: f32) -> Vec3 {
    let mut world = StaticCollisionWorld::new();
    world.add_shape(StaticShape::Plane {
        point: Vec3::ZERO,
        normal: Vec3::Y,
    });

    let settings = CableSettings::builder()
        .attach_start(false)
        .attach_end(false)
        .collision(true, friction)
        .width(2.0 * RADIUS)
        .build()
        .unwrap();
    let mut cable = CableComponent::new(settings, Transform::default()).unwrap();
    for particle in cable.particles_mut() {
        particle.position.y = 1.125;
        particle.previous_position = particle.position + Vec3::new(-0.25, 0.25, 0.0);
    }

    let ctx = SimulationContext::new(Vec3::ZERO, &world, &NoAttachments);
    cable.substep(&ctx);
    // First contact lands exactly where the sweep touched the plane.
    assert_relative_eq!(cable.particles()[5].position.x, 50.125, epsilon = 1e-4);
    assert_relative_eq!(cable.particles()[5].position.y, RADIUS, epsilon = 1e-4);

    for _ in 0..8 {
        cable.substep(&ctx);
    }
    cable.particles()[5].position
}

#[test]
fn friction_keeps_its_share_of_tangential_velocity() {
    // 0.125 to the contact, then 0.125 * (1 - friction) per remaining substep.
    for (friction, travelled) in [(0.0, 1.125), (0.5, 0.625), (1.0, 0.125)] {
        let middle = landing_position(friction);
        assert_relative_eq!(middle.x - 50.0, travelled, epsilon = 1e-3);
        assert_relative_eq!(middle.y, RADIUS, epsilon = 1e-4);
    }
}
