use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use relief_map::algorithms::SpatialClusterer;
use relief_map::models::{HoursOfOperation, LocatedEntity};
use relief_map::services::resolve;

fn grid(n: usize) -> Vec<LocatedEntity> {
    (0..n)
        .map(|i| {
            let lat = 34.0 + (i % 40) as f64 * 0.0015;
            let lon = -118.0 - (i / 40) as f64 * 0.0015;
            LocatedEntity::new(i as i64, format!("Site {}", i)).with_position(lat, lon)
        })
        .collect()
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    let clusterer = SpatialClusterer::default();

    for size in [100usize, 500, 2000] {
        let entities = grid(size);
        for zoom in [5, 12, 16] {
            group.bench_with_input(
                BenchmarkId::new(format!("zoom_{}", zoom), size),
                &entities,
                |b, entities| {
                    b.iter(|| black_box(clusterer.cluster(black_box(entities), zoom)));
                },
            );
        }
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");

    let weekly: HoursOfOperation = [
        ("Monday", "9:00 AM - 5:00 PM"),
        ("Wednesday", "10:00 AM - 2:00 PM"),
        ("Friday", "Not Open"),
    ]
    .into_iter()
    .collect();
    let start = NaiveDate::from_ymd_opt(2025, 1, 26)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    group.bench_function("resolve_week_hourly", |b| {
        b.iter(|| {
            for h in 0..(7 * 24) {
                black_box(resolve(black_box(&weekly), start + Duration::hours(h)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_clustering, bench_resolve);
criterion_main!(benches);
