//! Benchmarks for the rating histogram's hot paths.
//!
//! Targets driven by §5's resource model: point rank queries and batch
//! rank queries must stay effectively O(1) in the number of users, since
//! the histogram's width is bounded by `R_MAX - R_MIN` regardless of how
//! many users are recorded.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rankboard_core::{Rating, R_MAX, R_MIN};
use rankboard_engine::RankingEngine;
use rankboard_histogram::Histogram;

fn populated_histogram() -> Histogram {
    let mut h = Histogram::new();
    for value in R_MIN..=R_MAX {
        h.bump(Rating::new(value).unwrap(), 17).unwrap();
    }
    h
}

fn bench_rank_of(c: &mut Criterion) {
    let h = populated_histogram();
    let mid = Rating::new((R_MIN + R_MAX) / 2).unwrap();

    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(1));
    group.bench_function("rank_of", |b| b.iter(|| h.rank_of(mid)));
    group.finish();
}

fn bench_rank_batch(c: &mut Criterion) {
    let h = populated_histogram();
    let ratings: Vec<Rating> = (R_MIN..=R_MAX)
        .step_by(37)
        .map(|v| Rating::new(v).unwrap())
        .collect();

    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(ratings.len() as u64));
    group.bench_function("rank_batch", |b| b.iter(|| h.rank_batch(&ratings)));
    group.finish();
}

fn bench_bump(c: &mut Criterion) {
    let mut h = populated_histogram();
    let rating = Rating::new(2500).unwrap();

    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(1));
    group.bench_function("bump_round_trip", |b| {
        b.iter(|| {
            h.bump(rating, 1).unwrap();
            h.bump(rating, -1).unwrap();
        })
    });
    group.finish();
}

fn bench_engine_update_rating(c: &mut Criterion) {
    let engine = RankingEngine::new_ready(populated_histogram());
    let a = Rating::new(1500).unwrap();
    let b = Rating::new(1600).unwrap();

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(1));
    group.bench_function("update_rating_round_trip", |bencher| {
        bencher.iter(|| {
            engine.update_rating(a, b).unwrap();
            engine.update_rating(b, a).unwrap();
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rank_of,
    bench_rank_batch,
    bench_bump,
    bench_engine_update_rating,
);
criterion_main!(benches);
