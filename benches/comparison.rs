//! Benchmarks for comparison view construction.
//!
//! Measures the score series, magnitude series and detail table over mixed
//! site and app entries, plus magnitude parsing on its own.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cybercrawl::models::{AppRecord, SiteRecord};
use cybercrawl::{ComparisonView, MetricKey, MetricSelector, ResultEntry, parse_magnitude};
use std::hint::black_box;

fn mixed_entries(count: usize) -> Vec<ResultEntry> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                ResultEntry::new(
                    SiteRecord {
                        domain: format!("site{i}.example"),
                        sentiment_score: 70.0,
                        seo_score: 80.0,
                        ..SiteRecord::default()
                    }
                    .into(),
                    Vec::new(),
                )
            } else {
                ResultEntry::new(
                    AppRecord {
                        app_name: format!("App {i}"),
                        store_url: format!("https://apps.example/{i}"),
                        rating: Some(4.2),
                        downloads: format!("{i}M+"),
                        revenue: Some("$1M/mo".to_string()),
                        countries_available: vec![
                            "US".to_string(),
                            "JP".to_string(),
                            "DE".to_string(),
                            "BR".to_string(),
                        ],
                        ..AppRecord::default()
                    }
                    .into(),
                    Vec::new(),
                )
            }
        })
        .collect()
}

fn bench_comparison_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison_view");
    let selector = MetricSelector::default().without(MetricKey::Revenue);

    for count in [2_usize, 10, 100] {
        let entries = mixed_entries(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| ComparisonView::build(black_box(entries), black_box(&selector)));
        });
    }

    group.finish();
}

fn bench_parse_magnitude(c: &mut Criterion) {
    let inputs = ["10M+", "500k", "1.5M", "1,000,000+", "abc", ""];
    c.bench_function("parse_magnitude", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(parse_magnitude(black_box(input)));
            }
        });
    });
}

criterion_group!(benches, bench_comparison_view, bench_parse_magnitude);
criterion_main!(benches);
