/// Performance benchmarks for dataset exploration
///
/// These benchmarks measure query parsing and the full explore pipeline over
/// in-memory catalogs of increasing size.
///
/// Run with: cargo bench --bench explore_performance
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use chrono::{TimeZone, Utc};
use uuid::Uuid;
use uvlhub_common::types::{
    Author, Dataset, DatasetMetadata, FeatureModel, HubFile, PublicationType,
};
use uvlhub_server::catalog::InMemoryCatalog;
use uvlhub_server::features::explore::{parse_clauses, ExploreService};

const QUERIES: [(&str, &str); 4] = [
    ("empty", ""),
    ("tag", "tags:uvl"),
    ("author", "author:smith"),
    ("combined", "tags:uvl;author:smith;min_size:1000;models_max:4"),
];

/// Synthetic catalog with a spread of tags, authors and file counts
fn create_benchmark_data(count: usize) -> Vec<Dataset> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let tags = if i % 3 == 0 { "uvl,automotive" } else { "linux,kconfig" };
            let files = (0..(i % 5 + 1))
                .map(|j| HubFile {
                    id: Uuid::new_v4(),
                    name: format!("model_{j}.uvl"),
                    checksum: String::new(),
                    size: ((i * 37 + j * 101) % 5000) as i64,
                })
                .collect();
            Dataset {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                created_at: base + chrono::Duration::minutes(i as i64),
                metadata: DatasetMetadata {
                    title: format!("Benchmark dataset {i}"),
                    description: "Synthetic dataset".to_string(),
                    tags: tags.to_string(),
                    publication_type: PublicationType::DataManagementPlan,
                    publication_doi: None,
                    dataset_doi: None,
                    authors: vec![Author {
                        name: if i % 4 == 0 { "Jane Smith" } else { "John Doe" }.to_string(),
                        affiliation: None,
                        orcid: None,
                    }],
                },
                feature_models: vec![FeatureModel {
                    id: Uuid::new_v4(),
                    files,
                }],
            }
        })
        .collect()
}

fn bench_parse_clauses(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_clauses");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, query| {
            b.iter(|| parse_clauses(black_box(query)));
        });
    }

    group.finish();
}

fn bench_explore(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("explore");
    group.measurement_time(Duration::from_secs(10));

    for size in [100usize, 1_000, 10_000] {
        let service = ExploreService::new(Arc::new(InMemoryCatalog::new(
            create_benchmark_data(size),
        )));
        group.throughput(Throughput::Elements(size as u64));

        for (name, query) in QUERIES {
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &(service.clone(), query),
                |b, (service, query)| {
                    b.to_async(&rt).iter(|| async {
                        black_box(service.filter(query, "newest", "any").await.unwrap())
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse_clauses, bench_explore);
criterion_main!(benches);
