//! Benchmarks for softcloth frame updates.

use criterion::{criterion_group, criterion_main, Criterion};
use softcloth::*;

fn pinned_cloth(options: SimulationOptions<f32>) -> Cloth<f32> {
    let mut cloth = Cloth::new(Vec3::new(0.0, 2.0, 0.0), &GridConfig::new(20, 20, 0.1), options).unwrap();
    cloth.set_anchor(0, 0).unwrap();
    cloth.set_anchor(19, 0).unwrap();
    cloth
}

fn bench_euler(c: &mut Criterion) {
    c.bench_function("cloth_20x20_euler_60_frames", |b| {
        b.iter(|| {
            let mut cloth = pinned_cloth(SimulationOptions::new());
            for _ in 0..60 {
                cloth.update(16.0);
            }
            cloth.position_at(10, 19)
        });
    });
}

fn bench_rk4(c: &mut Criterion) {
    c.bench_function("cloth_20x20_rk4_60_frames", |b| {
        b.iter(|| {
            let options = SimulationOptions::new().with_integrator(IntegratorKind::RungeKutta4);
            let mut cloth = pinned_cloth(options);
            for _ in 0..60 {
                cloth.update(16.0);
            }
            cloth.position_at(10, 19)
        });
    });
}

fn bench_adaptive_wind(c: &mut Criterion) {
    c.bench_function("cloth_20x20_adaptive_wind_60_frames", |b| {
        b.iter(|| {
            let options = SimulationOptions::new()
                .with_wind(2.0)
                .with_integrator(IntegratorKind::RungeKutta4)
                .with_adaptive_step_size(true)
                .with_max_steps_per_frame(20);
            let mut cloth = pinned_cloth(options);
            for _ in 0..60 {
                cloth.update(16.0);
            }
            cloth.position_at(10, 19)
        });
    });
}

fn bench_derivative(c: &mut Criterion) {
    let cloth = pinned_cloth(SimulationOptions::new().with_wind(1.0));
    c.bench_function("cloth_20x20_derivative", |b| b.iter(|| cloth.derivative()));
}

criterion_group!(benches, bench_euler, bench_rk4, bench_adaptive_wind, bench_derivative);
criterion_main!(benches);
