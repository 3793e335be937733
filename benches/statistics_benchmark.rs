#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for gap statistics and the windowed density analyses.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use twinviz::prelude::*;
use twinviz::stats::density::{density_windows, default_window, proportion_windows};

fn statistics_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for limit in [100_000u64, 1_000_000, 10_000_000] {
        let generation = generate(limit).unwrap();

        group.bench_with_input(
            BenchmarkId::new("gap_statistics", limit),
            &generation,
            |b, generation| {
                b.iter(|| compute_statistics(black_box(generation.pairs())).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("density_windows", limit),
            &generation,
            |b, generation| {
                let window = default_window(limit);
                b.iter(|| density_windows(black_box(generation.pairs()), limit, window).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("proportion_windows", limit),
            &generation,
            |b, generation| {
                b.iter(|| proportion_windows(black_box(generation), 100));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, statistics_benchmark);
criterion_main!(benches);
