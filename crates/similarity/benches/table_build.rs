//! Benchmarks for building and querying the similarity table
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic dataset roughly the shape of MovieLens 100k.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{DataIndex, Rating};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use similarity::{QueryConfig, SimilarityTable};

fn synthetic_index() -> DataIndex {
    let mut rng = StdRng::seed_from_u64(42);
    let mut index = DataIndex::new();

    for user_id in 1..=943 {
        for movie_id in 1..=1682 {
            if rng.random_bool(0.06) {
                index.insert_rating(Rating {
                    user_id,
                    movie_id,
                    rating: rng.random_range(1..=5) as f32,
                    timestamp: 0,
                });
            }
        }
    }
    index
}

fn bench_build_table(c: &mut Criterion) {
    let index = synthetic_index();

    let mut group = c.benchmark_group("similarity_table");
    group.sample_size(10);
    group.bench_function("build_from_index", |b| {
        b.iter(|| {
            let table = SimilarityTable::from_index(black_box(&index));
            black_box(table)
        })
    });
    group.finish();
}

fn bench_similar_to(c: &mut Criterion) {
    let index = synthetic_index();
    let table = SimilarityTable::from_index(&index);
    let config = QueryConfig::default();

    c.bench_function("similar_to", |b| {
        b.iter(|| {
            let results = table.similar_to(black_box(50), black_box(&config));
            black_box(results)
        })
    });
}

criterion_group!(benches, bench_build_table, bench_similar_to);
criterion_main!(benches);
