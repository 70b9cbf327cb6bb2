use cable_sim::*;

fn main() {
    let mut system = CableSystem::new();
    system.set_parallel_enabled(true);
    system.collision.add_shape(StaticShape::Plane {
        point: Vec3::new(0.0, -40.0, 0.0),
        normal: Vec3::Y,
    });
    system.collision.add_shape(StaticShape::Sphere {
        center: Vec3::new(50.0, -25.0, 0.0),
        radius: 15.0,
    });
    system
        .attachments
        .set("crane_hook", Transform::from_position(Vec3::new(0.0, 10.0, 0.0)));

    let settings = CableSettings::builder()
        .length(160.0)
        .segments(32)
        .solver_iterations(8)
        .stiffness(true)
        .collision(true, 0.4)
        .width(2.0)
        .end_location(Vec3::new(100.0, 0.0, 0.0))
        .build()
        .expect("settings should be valid");
    let cable_id = system
        .spawn_cable(settings, Transform::default(), Some("crane_hook"))
        .expect("cable should spawn");

    let snapshots = system.snapshots();
    for frame in 0..240 {
        // Swing the hook back and forth.
        let t = frame as f32 / 60.0;
        system.attachments.set(
            "crane_hook",
            Transform::from_position(Vec3::new(0.0, 10.0, 30.0 * t.sin())),
        );
        system.tick(1.0 / 60.0);
    }

    if let Some(snapshot) = snapshots.get(cable_id) {
        let lowest = snapshot
            .positions
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min);
        println!("Lowest point after draping: {lowest:.2}");
        println!("Bounds: {:?} .. {:?}", snapshot.bounds.min, snapshot.bounds.max);
        println!("Mesh triangles: {}", snapshot.build_mesh().triangle_count());
    }
    if let Some(cable) = system.cable(cable_id) {
        cable.profiler().report();
        println!("Collision hits: {}", cable.profiler().collision_hits);
    }
}
