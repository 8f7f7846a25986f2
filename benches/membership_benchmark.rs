use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use fitbro_backend::db::MAX_TREE_DEPTH;
use fitbro_backend::services::catalog::check_lineage;
use fitbro_backend::services::membership::membership_end_date;
use std::hint::black_box;

fn benchmark_end_dates(c: &mut Criterion) {
    // Every start date in a leap year, so month-end clamping is exercised
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let starts: Vec<NaiveDate> = (0..366).map(|d| first + Duration::days(d)).collect();

    let mut group = c.benchmark_group("membership_end_date");

    for months in [1_i64, 6, 12] {
        group.bench_function(format!("{}_months_full_year", months), |b| {
            b.iter(|| {
                for start in &starts {
                    let _ = membership_end_date(black_box(*start), black_box(months));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_lineage_check(c: &mut Criterion) {
    // Deepest parent lineage that still accepts a child
    let lineage: Vec<i64> = (1..MAX_TREE_DEPTH as i64).collect();

    c.bench_function("catalog_lineage_check_max_depth", |b| {
        b.iter(|| check_lineage(black_box(Some(1000)), black_box(1), black_box(&lineage)))
    });
}

criterion_group!(benches, benchmark_end_dates, benchmark_lineage_check);
criterion_main!(benches);
