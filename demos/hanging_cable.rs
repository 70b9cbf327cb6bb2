use cable_sim::*;

fn main() {
    let settings = CableSettings::builder()
        .length(120.0)
        .segments(12)
        .solver_iterations(4)
        .end_location(Vec3::new(100.0, 0.0, 0.0))
        .build()
        .expect("settings should be valid");
    let mut cable =
        CableComponent::new(settings, Transform::default()).expect("cable should build");

    let ctx = SimulationContext::default();
    let mut substeps = 0;
    for _ in 0..180 {
        substeps += cable.tick(1.0 / 60.0, &ctx);
    }

    println!("Ran {substeps} substeps over three seconds");
    for (i, position) in cable.particle_positions().iter().enumerate() {
        println!("  particle {i:2}: {position:?}");
    }
    println!(
        "Length {:.2} (rest {:.2}), worst segment error {:.4}",
        cable.current_length(),
        cable.settings().length,
        cable.max_segment_error()
    );

    let mesh = cable.build_mesh();
    println!(
        "Tube mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
}
