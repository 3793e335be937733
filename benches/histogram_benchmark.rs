#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for gap histogram rendering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use twinviz::prelude::*;

fn histogram_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for limit in [10_000u64, 100_000, 1_000_000] {
        let generation = generate(limit).unwrap();
        let data: Vec<f32> = gaps(generation.pairs()).iter().map(|&g| g as f32).collect();

        group.bench_with_input(BenchmarkId::from_parameter(limit), &data, |b, data| {
            b.iter(|| {
                let hist = Histogram::new()
                    .data(black_box(data))
                    .bins(BinStrategy::GAPS)
                    .dimensions(800, 600)
                    .build()
                    .unwrap();

                hist.to_framebuffer().unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, histogram_benchmark);
criterion_main!(benches);
