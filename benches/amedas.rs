use amedas::{build_url, AmedasFetcher, Resolution, Station};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn bench_request_keys(c: &mut Criterion) {
    let station = Station::new(
        Some("44".to_string()),
        "47662".to_string(),
        47662,
        Some("Tokyo".to_string()),
        Some("44132".to_string()),
        None,
        None,
        25.2,
    );
    let date = NaiveDate::from_ymd_opt(2016, 4, 12).unwrap();
    let fetcher = AmedasFetcher::new(Path::new("."));

    c.bench_function("build_url_hourly", |b| {
        b.iter(|| build_url(black_box(&station), Resolution::Hourly, black_box(date)))
    });
    c.bench_function("cache_path_daily", |b| {
        b.iter(|| fetcher.cache_path(black_box(&station), Resolution::Daily, black_box(date)))
    });
}

criterion_group!(benches, bench_request_keys);
criterion_main!(benches);
