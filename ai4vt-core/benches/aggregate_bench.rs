//! Criterion benchmarks for the per-fetch derivation path.
//!
//! Benchmarks:
//! 1. DerivedMetrics::compute over a multi-year history
//! 2. Time-range filtering plus precision bars for the trends view
//! 3. Newest-first ordering plus one page slice for the history table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ai4vt_core::api::sample_history;
use ai4vt_core::pagination::{newest_first, Paginator};
use ai4vt_core::series::{precision_bars, TimeRange};
use ai4vt_core::DerivedMetrics;

fn end_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for days in [30usize, 250, 1000] {
        let history = sample_history(days, end_date(), 42);
        group.bench_with_input(BenchmarkId::from_parameter(days), &history, |b, h| {
            b.iter(|| DerivedMetrics::compute(black_box(h)))
        });
    }
    group.finish();
}

fn bench_trends(c: &mut Criterion) {
    let history = sample_history(1000, end_date(), 42);
    c.bench_function("trends_90d", |b| {
        b.iter(|| {
            let window = TimeRange::Last90Days.filter(black_box(&history), end_date());
            precision_bars(&window)
        })
    });
}

fn bench_table_page(c: &mut Criterion) {
    let history = sample_history(1000, end_date(), 42);
    let mut pager = Paginator::default();
    pager.go_to(7, history.len());
    c.bench_function("table_page", |b| {
        b.iter(|| {
            let rows = newest_first(black_box(&history));
            pager.slice(&rows).len()
        })
    });
}

criterion_group!(benches, bench_compute, bench_trends, bench_table_page);
criterion_main!(benches);
