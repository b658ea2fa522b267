use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use svgchart::api::{ChartRequest, ChartService, InMemorySeriesSource, RateLimitConfig, ServiceConfig};
use svgchart::core::{ChartSeries, ChartType, DataPoint, RenderOptions, normalize};
use svgchart::render::render_chart;

fn sample_series(count: usize) -> ChartSeries {
    ChartSeries::new(
        (0..count)
            .map(|i| {
                let t = i as f64;
                DataPoint::new(format!("p{i:04}"), 100.0 + (t * 0.1).sin() * 25.0)
            })
            .collect(),
    )
}

fn bench_render_line_1k(c: &mut Criterion) {
    let series = sample_series(1_000);
    let options = RenderOptions::default().with_dimensions(1600, 900);

    c.bench_function("render_line_1k", |b| {
        b.iter(|| {
            let _ = render_chart(black_box(series.clone()), black_box(options.clone()))
                .expect("line render");
        })
    });
}

fn bench_render_bar_and_pie_100(c: &mut Criterion) {
    let series = sample_series(100);
    for chart_type in [ChartType::Bar, ChartType::Pie] {
        let options = RenderOptions::default().with_chart_type(chart_type);
        c.bench_function(&format!("render_{chart_type}_100"), |b| {
            b.iter(|| {
                let _ = render_chart(black_box(series.clone()), black_box(options.clone()))
                    .expect("render");
            })
        });
    }
}

fn bench_normalize_rows_10k(c: &mut Criterion) {
    let rows: Vec<Vec<serde_json::Value>> = (0..10_000)
        .map(|i| vec![serde_json::json!(format!("r{i}")), serde_json::json!(i.to_string())])
        .collect();

    c.bench_function("normalize_rows_10k", |b| {
        b.iter(|| {
            let _ = normalize(black_box(rows.clone())).expect("normalize");
        })
    });
}

fn bench_service_cache_hit(c: &mut Criterion) {
    let source = InMemorySeriesSource::new();
    source.insert("bench", sample_series(500));
    let config = ServiceConfig::default()
        .with_rate_limit(RateLimitConfig::per_minute(u32::MAX).with_burst(u32::MAX));
    let service = ChartService::new(source, config).expect("service");
    let request = ChartRequest::new("bench").with_chart_type("bar");
    assert!(service.handle(&request).is_ok());

    c.bench_function("service_cache_hit", |b| {
        b.iter(|| {
            let _ = black_box(service.handle(black_box(&request)));
        })
    });
}

criterion_group!(
    benches,
    bench_render_line_1k,
    bench_render_bar_and_pie_100,
    bench_normalize_rows_10k,
    bench_service_cache_hit
);
criterion_main!(benches);
