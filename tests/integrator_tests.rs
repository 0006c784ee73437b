use approx::assert_abs_diff_eq;
use softcloth::{Cloth, GridConfig, IntegratorKind, SimulationOptions, Vec3};

const AMPLITUDE: f64 = 0.2;
const OMEGA: f64 = 10.0; // sqrt(k / m) with k = 100, m = 1

/// One free particle on an undamped spring to a pinned particle.
fn oscillator(integrator: IntegratorKind) -> Cloth<f64> {
    let options = SimulationOptions::new()
        .with_spacing(1.0)
        .with_toughness(OMEGA * OMEGA)
        .with_particle_mass(1.0)
        .with_gravity(0.0)
        .with_air_resistance(0.0)
        .with_integrator(integrator)
        .with_max_steps_per_frame(8);
    let mut cloth = Cloth::new(Vec3::new(0.0, 1.0, 0.0), &GridConfig::new(2, 1, 1.0), options).unwrap();
    cloth.set_anchor(0, 0).unwrap();
    cloth.set_particle_position(1, 0, Vec3::new(1.0 + AMPLITUDE, 1.0, 0.0)).unwrap();
    cloth
}

/// Distance from the analytic solution after roughly ten periods.
fn phase_error(integrator: IntegratorKind) -> f64 {
    let mut cloth = oscillator(integrator);
    // 393 frames of 16 ms with h = 2 ms is just over 10 periods of 2*pi/10 s.
    for _ in 0..393 {
        cloth.update(16.0);
    }
    let t = cloth.elapsed();
    let exact = 1.0 + AMPLITUDE * (OMEGA * t).cos();
    (cloth.position_at(1, 0).x - exact).abs()
}

#[test]
fn rk4_beats_euler_on_phase_error() {
    let euler = phase_error(IntegratorKind::Euler);
    let rk4 = phase_error(IntegratorKind::RungeKutta4);
    assert!(rk4 < euler, "rk4 error {} should be below euler error {}", rk4, euler);
    assert!(rk4 < 1e-6, "rk4 error {} too large", rk4);
    assert!(euler > 1e-2, "euler should drift visibly, error {}", euler);
}

#[test]
fn oscillation_stays_on_axis() {
    let mut cloth = oscillator(IntegratorKind::RungeKutta4);
    for _ in 0..100 {
        cloth.update(16.0);
    }
    let p = cloth.position_at(1, 0);
    assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cloth.elapsed(), 1.6, epsilon = 1e-9);
}
