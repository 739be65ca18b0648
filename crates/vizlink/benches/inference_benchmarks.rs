//! Pipeline performance benchmarks.
//!
//! Measures loading, classification, filtering and color building over
//! generated artist-style datasets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use vizlink::input::DataLoader;
use vizlink::{apply_filters, build_color_map, classify, recommend, Dashboard, FilterPredicate, FilterSet, Record};

/// Generate a dataset with categorical, numerical, date, nested and relation fields.
fn generate_records(rows: usize) -> Value {
    let regions = ["Asia", "Europe", "Oceania", "Africa", "North America"];
    let genres = ["Jazz", "Rock", "Pop", "Country", "Electronic"];

    let records: Vec<Value> = (0..rows)
        .map(|row| {
            let collaborators: Vec<String> = (1..=(row % 4))
                .map(|k| format!("Artist {}", (row + k * 7) % rows.max(1)))
                .collect();
            json!({
                "Artist": format!("Artist {}", row),
                "Region": regions[row % regions.len()],
                "Genre": genres[row % genres.len()],
                "Followers": (row % 97) as f64 * 1.5,
                "Debut": format!("20{:02}-{:02}-{:02}", row % 24, (row % 12) + 1, (row % 28) + 1),
                "Stats": {"albums": row % 9, "awards": {"gold": row % 3}},
                "CollaboratedWith": collaborators,
            })
        })
        .collect();

    Value::Array(records)
}

fn load(rows: usize) -> Vec<Record> {
    DataLoader::new()
        .load_value(&generate_records(rows), "bench")
        .unwrap()
        .records
}

/// Benchmark text-to-records loading (parse + normalize + flatten).
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for rows in [100, 1_000, 10_000].iter() {
        let text = generate_records(*rows).to_string();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &text, |b, text| {
            let loader = DataLoader::new();
            b.iter(|| black_box(loader.load_str(text).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark field classification.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for rows in [100, 1_000, 10_000].iter() {
        let records = load(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &records, |b, records| {
            b.iter(|| black_box(classify(records).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark filtering against the canonical records.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    let filters = FilterSet::new()
        .with(FilterPredicate::categorical("Region", ["Asia", "Europe"]))
        .with(FilterPredicate::range("Followers", 10.0, 100.0));

    for rows in [1_000, 10_000].iter() {
        let records = load(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &records, |b, records| {
            b.iter(|| black_box(apply_filters(records, &filters)))
        });
    }

    group.finish();
}

/// Benchmark color map construction.
fn bench_colors(c: &mut Criterion) {
    let mut group = c.benchmark_group("colors");

    for rows in [1_000, 10_000].iter() {
        let records = load(*rows);
        let selections = recommend(&classify(&records).unwrap());
        group.bench_with_input(BenchmarkId::new("rows", rows), &records, |b, records| {
            b.iter(|| black_box(build_color_map(records, &selections)))
        });
    }

    group.finish();
}

/// Benchmark a full filter change on a loaded dashboard (refilter, prune, recolor).
fn bench_dashboard_filter_change(c: &mut Criterion) {
    let mut dashboard = Dashboard::new();
    dashboard.load_value(&generate_records(5_000), "bench").unwrap();
    dashboard.click("Artist 7", false);

    c.bench_function("dashboard_filter_change", |b| {
        b.iter(|| {
            dashboard
                .set_filter(FilterPredicate::range("Followers", 0.0, 50.0))
                .unwrap();
            dashboard.reset_filters();
            black_box(dashboard.summary())
        })
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_classify,
    bench_filter,
    bench_colors,
);

criterion_group!(
    name = dashboard_benches;
    config = Criterion::default().sample_size(20);
    targets = bench_dashboard_filter_change
);

criterion_main!(benches, dashboard_benches);
