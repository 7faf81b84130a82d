//! Criterion micro-benchmarks for carrier drift.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use siggen_bench::coarse_profile;
use siggen_core::{CarrierKind, FieldSampler, Point};
use siggen_drift::DriftIntegrator;

/// Benchmark: 1000 bilinear field samples across the crystal.
fn bench_sample_1k(c: &mut Criterion) {
    let grid = coarse_profile().field.solve().unwrap();
    let points: Vec<Point> = (0..1000)
        .map(|i| {
            let f = i as f64 / 1000.0;
            Point::from_cylindrical(28.0 * f, 6.0 * f, 2.0 + 46.0 * f)
        })
        .collect();

    c.bench_function("sample_1k", |b| {
        b.iter(|| {
            for p in &points {
                black_box(grid.sample(*p).unwrap());
            }
        });
    });
}

/// Benchmark: drift a hole and an electron from mid-crystal to collection.
fn bench_integrate_pair(c: &mut Criterion) {
    let config = coarse_profile();
    let grid = config.field.solve().unwrap();
    let integrator = DriftIntegrator::new(&grid, &config.drift);
    let start = Point::new(15.0, 0.0, 30.0);

    c.bench_function("integrate_pair", |b| {
        b.iter(|| {
            for carrier in CarrierKind::ALL {
                let t = integrator.integrate(start, carrier, 1.0).unwrap();
                black_box(&t);
            }
        });
    });
}

criterion_group!(benches, bench_sample_1k, bench_integrate_pair);
criterion_main!(benches);
