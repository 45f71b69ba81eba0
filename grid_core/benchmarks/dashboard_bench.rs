use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use grid_core::{
    ChartFrame, Dashboard, DashboardConfig, Dataset, GeoPoint, Region, RegionId, Summary, Timeline,
};

fn synthetic_dataset(regions: usize) -> Dataset {
    let regions = (0..regions)
        .map(|i| Region {
            id: RegionId::new(format!("region-{i}")),
            name: format!("Region {i}"),
            center: GeoPoint::new(30.0 + (i % 15) as f64, 128.0 + (i % 17) as f64),
            under_review: 100.0 + (i * 37 % 3000) as f64,
            contracted: (i * 13 % 600) as f64,
            connected: (i * 7 % 90) as f64,
            vre_ratio: 10.0 + (i % 25) as f64,
            curtailment_rate: (i % 8) as f64 * 0.75,
            solar_applications: (i * 101 % 15000) as u64,
            wind_applications: (i * 11 % 1200) as u64,
            characteristics: String::new(),
        })
        .collect();
    let labels: Vec<String> = (0..24).map(|q| format!("T{q}")).collect();
    let values = (0..24).map(|q| 1000.0 + (q * q) as f64 * 45.0).collect();
    Dataset {
        regions,
        summary: Summary {
            total_under_review: 16_300.0,
            total_contracted: 2_900.0,
            total_connected: 430.0,
        },
        timeline: Timeline {
            labels,
            total_under_review: values,
        },
    }
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let config = DashboardConfig::builtin();

    for size in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("regions", size), &size, |b, &size| {
            b.iter_batched(
                || synthetic_dataset(size),
                |dataset| {
                    Dashboard::new(dataset, Arc::clone(&config), ChartFrame::plot(600.0, 160.0))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let config = DashboardConfig::builtin();
    let mut dash = Dashboard::new(
        synthetic_dataset(1000),
        config,
        ChartFrame::plot(600.0, 160.0),
    );
    c.bench_function("select_region/1000", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % 1000;
            dash.select_region(&format!("region-{i}"))
        })
    });
}

criterion_group!(dashboard_benches, bench_derive, bench_selection);
criterion_main!(dashboard_benches);
