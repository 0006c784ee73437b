use softcloth::{Cloth, GridConfig, IntegratorKind, SimulationOptions, SpringTopology, Vec, Vec3};

#[test]
fn stretched_pair_recovers_rest_length() {
    let options = SimulationOptions::new()
        .with_spacing(1.0)
        .with_toughness(50.0)
        .with_gravity(0.0)
        .with_air_resistance(10.0)
        .with_integrator(IntegratorKind::RungeKutta4);
    let mut cloth = Cloth::new(Vec3::new(0.0, 1.0, 0.0), &GridConfig::new(2, 1, 1.0), options).unwrap();
    cloth.set_particle_position(1, 0, Vec3::new(1.5, 1.0, 0.0)).unwrap();

    let separation = |c: &Cloth<f64>| c.position_at(0, 0).distance(c.position_at(1, 0));
    assert!((separation(&cloth) - 1.5).abs() < 1e-12);

    // 10 simulated seconds
    for _ in 0..625 {
        cloth.update(16.0);
    }

    let error = (separation(&cloth) - 1.0).abs();
    assert!(error < 0.01, "separation still off rest length by {}", error);
}

#[test]
fn compressed_pair_pushes_apart() {
    let options = SimulationOptions::new()
        .with_spacing(1.0)
        .with_toughness(50.0)
        .with_gravity(0.0)
        .with_air_resistance(0.0);
    let mut cloth = Cloth::with_topology(
        Vec3::new(0.0, 1.0, 0.0),
        &GridConfig::new(2, 1, 1.0),
        options,
        SpringTopology::structural(),
    )
    .unwrap();
    cloth.set_particle_position(1, 0, Vec3::new(0.5, 1.0, 0.0)).unwrap();

    cloth.update(16.0);

    assert!(cloth.velocity_at(0, 0).x < 0.0);
    assert!(cloth.velocity_at(1, 0).x > 0.0);
}

#[test]
fn stiffness_edits_apply_next_frame() {
    let options = SimulationOptions::new()
        .with_spacing(1.0)
        .with_toughness(0.0)
        .with_gravity(0.0)
        .with_air_resistance(0.0);
    let mut cloth = Cloth::new(Vec3::new(0.0, 1.0, 0.0), &GridConfig::new(2, 1, 1.0), options).unwrap();
    cloth.set_particle_position(1, 0, Vec3::new(2.0, 1.0, 0.0)).unwrap();

    cloth.update(16.0);
    assert_eq!(cloth.velocity_at(1, 0), Vec3::zero());

    cloth.options_mut().toughness = 100.0;
    cloth.update(16.0);
    assert!(cloth.velocity_at(1, 0).x < 0.0);
}
