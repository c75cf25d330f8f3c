// Ranking benchmarks over a synthetic catalog
use carfit_core::{AccessoryRecord, Catalog, TextIndex, UserProfile, VectorizerConfig};
use carfit_ranking::RecommendationEngine;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::sync::Arc;

const CARS: &[(&str, &str)] = &[
    ("Toyota", "Camry"),
    ("Toyota", "Corolla"),
    ("Honda", "Civic"),
    ("Honda", "City"),
    ("Hyundai", "Creta"),
    ("Maruti", "Swift"),
];
const ITEMS: &[&str] = &["Seat Cover", "Floor Mat", "Phone Mount", "Fog Lamp", "Spoiler", "Sun Shade", "Dash Cam"];
const CATEGORIES: &[&str] = &["Interior", "Exterior", "Electronics", "Safety"];
const LABELS: &[&str] = &["Positive", "Positive", "Neutral", "Negative"];
const EMOTIONS: &[&str] = &["Happy", "Satisfied", "Disappointed", "Angry", "Neutral"];

fn generate_record(rng: &mut StdRng, id: usize) -> AccessoryRecord {
    let (brand, model) = CARS[rng.random_range(0..CARS.len())];
    let item = ITEMS[rng.random_range(0..ITEMS.len())];
    let compatible = if rng.random_bool(0.1) {
        "Universal - All Cars".to_string()
    } else {
        let (other_brand, other_model) = CARS[rng.random_range(0..CARS.len())];
        format!("{} {}, {} {}", brand, model, other_brand, other_model)
    };

    AccessoryRecord::new(
        format!("ACC{:05}", id),
        format!("{} {} #{}", model, item, id),
        brand,
        model,
        compatible,
        rng.random_range(200.0..5000.0f64).round(),
    )
    .with_description(format!("Durable {} designed for the {} {}", item.to_lowercase(), brand, model))
    .with_category(CATEGORIES[rng.random_range(0..CATEGORIES.len())])
    .with_sentiment(rng.random_range(-1.0..1.0), LABELS[rng.random_range(0..LABELS.len())])
    .with_quality(rng.random_range(-1.0..1.0))
    .with_dominant_emotion(EMOTIONS[rng.random_range(0..EMOTIONS.len())])
    .with_emotion_score("Happy", rng.random_range(0.0..1.0))
    .with_emotion_score("Satisfied", rng.random_range(0.0..1.0))
}

fn build_engine(size: usize) -> RecommendationEngine {
    let mut rng = StdRng::seed_from_u64(42);
    let records = (0..size).map(|i| generate_record(&mut rng, i)).collect();
    let catalog = Catalog::new(records).unwrap();
    let index = TextIndex::fit(&catalog.documents(), VectorizerConfig::default());
    RecommendationEngine::new(catalog, index).unwrap()
}

fn profile() -> UserProfile {
    UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0)
        .with_quality_threshold(-0.5)
        .with_emotions(["Happy", "Satisfied"])
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for size in [1_000, 10_000].iter() {
        let engine = build_engine(*size);
        let plain = profile();
        let searched = profile().with_query("durable seat cover");

        group.bench_with_input(BenchmarkId::new("legacy", size), size, |b, _| {
            b.iter(|| black_box(engine.recommend(black_box(&plain), 6, 0.3)).len());
        });
        group.bench_with_input(BenchmarkId::new("legacy_with_query", size), size, |b, _| {
            b.iter(|| black_box(engine.recommend(black_box(&searched), 6, 0.3)).len());
        });
    }

    group.finish();
}

fn benchmark_sectioned(c: &mut Criterion) {
    let mut group = c.benchmark_group("sectioned");
    let engine = build_engine(10_000);
    let profile = profile().with_categories(["Interior", "Safety"]);

    group.bench_function("sectioned_10k", |b| {
        b.iter(|| black_box(engine.recommend_sectioned(black_box(&profile), 6, 6)).total());
    });

    group.finish();
}

fn benchmark_concurrent_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    let engine = Arc::new(build_engine(10_000));

    group.bench_function("four_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let engine = engine.clone();
                    std::thread::spawn(move || engine.recommend(&profile(), 6, 0.3).len())
                })
                .collect();
            for handle in handles {
                black_box(handle.join().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_recommend, benchmark_sectioned, benchmark_concurrent_requests);
criterion_main!(benches);
