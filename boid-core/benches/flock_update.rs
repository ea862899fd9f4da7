//! Benchmarks for the per-frame flock update.
//!
//! Run with: `cargo bench -p boid-core`

use boid_core::{Flock, Vec3};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_update");

    for count in [50, 100, 200, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let mut flock = Flock::with_rng(n, &mut StdRng::seed_from_u64(42));
            b.iter(|| {
                flock.update();
                black_box(flock.boids().len())
            });
        });
    }

    group.finish();
}

fn bench_update_with_attraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_update_attracted");

    for count in [100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let mut flock = Flock::with_rng(n, &mut StdRng::seed_from_u64(42));
            flock.add_attraction_point(Vec3::new(-0.5, 2.0, 0.0));
            flock.add_attraction_point(Vec3::new(0.5, 2.0, 0.0));
            b.iter(|| {
                flock.update();
                black_box(flock.boids().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_update_with_attraction);
criterion_main!(benches);
