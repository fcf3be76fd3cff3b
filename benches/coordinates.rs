//! Benchmarks for coordinate construction and measurement
//!
//! Compares plain construction with construction through the registry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geocoord::{CartesianPoint, Coordinate, CoordinateRegistry, SphericalPoint};
use std::f64::consts::PI;

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("cartesian_new", |b| {
        b.iter(|| CartesianPoint::new(black_box(3.0), black_box(7.0), black_box(9.0)))
    });

    group.bench_function("spherical_new", |b| {
        b.iter(|| SphericalPoint::new(black_box(6_378_136.6), black_box(0.7), black_box(-2.1)))
    });

    let registry = CoordinateRegistry::new();
    group.bench_function("registry_cache_hit", |b| {
        b.iter(|| registry.cartesian(black_box(3.0), black_box(7.0), black_box(9.0)))
    });

    group.finish();
}

fn bench_measurement(c: &mut Criterion) {
    let mut group = c.benchmark_group("measurement");

    let a = CartesianPoint::new(3.0, 7.0, 9.0).unwrap();
    let b = SphericalPoint::new(12.0, PI / 3.0, PI / 5.0).unwrap();

    group.bench_function("distance_to", |bench| {
        bench.iter(|| black_box(&a).distance_to(black_box(&b)))
    });
    group.bench_function("central_angle", |bench| {
        bench.iter(|| black_box(&a).central_angle(black_box(&b)))
    });
    group.bench_function("to_spherical", |bench| {
        bench.iter(|| black_box(&a).to_spherical())
    });

    group.finish();
}

fn bench_registry_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_fill");

    for count in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::new("distinct", count), &count, |b, &count| {
            b.iter(|| {
                let registry = CoordinateRegistry::new();
                for k in 0..count {
                    let _ = registry.cartesian(k as f64, 1.0, 2.0);
                }
                registry.stats()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_measurement,
    bench_registry_fill
);
criterion_main!(benches);
