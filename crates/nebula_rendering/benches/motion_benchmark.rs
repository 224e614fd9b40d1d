//! Benchmark for the per-frame integrator step.
//!
//! TARGET: 15,000 particles stepped in under 1 ms
//!
//! Run with: cargo bench --package nebula_rendering --bench motion_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nebula_procedural::ShapeSeed;
use nebula_rendering::MotionIntegrator;
use nebula_shared::{HandSignal, MotionTuning, SceneConfig, ShapeKind, Vec2};

fn integrator(count: usize) -> MotionIntegrator {
    let config = SceneConfig {
        shape: ShapeKind::Sphere,
        particle_count: count,
        ..SceneConfig::default()
    };
    MotionIntegrator::with_seed(&config, MotionTuning::default(), ShapeSeed::new(42))
}

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator_step");

    for count in [1_000, 8_000, 15_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("interactive", count), &count, |b, &count| {
            let mut m = integrator(count);
            let signal = HandSignal::tracked(0.7, Vec2::new(0.1, 0.2), 0.4, 1.2);
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                m.step(black_box(&signal), t);
            });
        });

        group.bench_with_input(BenchmarkId::new("idle", count), &count, |b, &count| {
            let mut m = integrator(count);
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                m.step(black_box(&HandSignal::ABSENT), t);
            });
        });
    }

    group.finish();
}

fn benchmark_reallocation(c: &mut Criterion) {
    c.bench_function("reallocate_8k_to_4k", |b| {
        b.iter(|| {
            let mut m = integrator(8_000);
            let mut config = m.config().clone();
            config.particle_count = 4_000;
            black_box(m.apply_config(&config))
        });
    });
}

criterion_group!(benches, benchmark_step, benchmark_reallocation);
criterion_main!(benches);
