use softcloth::{Cloth, GridConfig, IntegratorKind, SimulationOptions, Vec3};

const MAX_STEPS: usize = 20;

fn gusty_cloth(integrator: IntegratorKind, max_error: f64) -> Cloth<f64> {
    let options = SimulationOptions::new()
        .with_wind(2.0)
        .with_integrator(integrator)
        .with_adaptive_step_size(true)
        .with_max_error(max_error)
        .with_max_steps_per_frame(MAX_STEPS);
    let mut cloth = Cloth::new(Vec3::new(0.0, 1.0, 0.0), &GridConfig::new(5, 5, 0.1), options).unwrap();
    cloth.set_anchor(0, 0).unwrap();
    cloth.set_anchor(4, 0).unwrap();
    cloth
}

/// Sub-steps taken over one simulated second.
fn total_steps(cloth: &mut Cloth<f64>) -> usize {
    let mut total = 0;
    for _ in 0..60 {
        let plan = cloth.update(16.0);
        let steps = cloth.options().current_steps_per_frame();
        assert_eq!(plan.steps, steps);
        assert!((1..=MAX_STEPS).contains(&steps), "{} steps planned", steps);
        assert!((cloth.options().current_step_size() * steps as f64 - 0.016).abs() < 1e-12);
        total += steps;
    }
    total
}

#[test]
fn tight_tolerance_saturates_step_budget() {
    let mut cloth = gusty_cloth(IntegratorKind::Euler, 1e-6);
    assert_eq!(total_steps(&mut cloth), 60 * MAX_STEPS);
}

#[test]
fn looser_tolerance_takes_fewer_steps() {
    for integrator in IntegratorKind::ALL {
        let tight = total_steps(&mut gusty_cloth(integrator, 1e-3));
        let loose = total_steps(&mut gusty_cloth(integrator, 1e-1));
        assert!(loose < tight, "{:?}: {} loose vs {} tight", integrator, loose, tight);
    }
}

#[test]
fn rk4_needs_fewer_steps_than_euler() {
    let euler = total_steps(&mut gusty_cloth(IntegratorKind::Euler, 1e-3));
    let rk4 = total_steps(&mut gusty_cloth(IntegratorKind::RungeKutta4, 1e-3));
    assert!(rk4 < euler, "rk4 {} vs euler {}", rk4, euler);
}

#[test]
fn non_positive_tolerance_uses_step_ceiling() {
    let mut cloth = gusty_cloth(IntegratorKind::RungeKutta4, 0.0);
    cloth.update(16.0);
    assert_eq!(cloth.options().current_steps_per_frame(), MAX_STEPS);
}

#[test]
fn disabling_adaptivity_restores_fixed_steps() {
    let mut cloth = gusty_cloth(IntegratorKind::RungeKutta4, 1e-1);
    cloth.update(16.0);
    assert!(cloth.options().current_steps_per_frame() < MAX_STEPS);

    cloth.options_mut().adaptive_step_size = false;
    cloth.update(16.0);
    assert_eq!(cloth.options().current_steps_per_frame(), MAX_STEPS);
}
