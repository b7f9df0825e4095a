use criterion::{black_box, criterion_group, criterion_main, Criterion};

use retell_core::catalog::{BuiltinCatalog, StoryCatalog};
use retell_core::engine::ScoringEngine;
use retell_core::metrics::{coherence, fluency, similarity, vocabulary};

fn bench_metrics(c: &mut Criterion) {
    let catalog = BuiltinCatalog::new();
    let story = &catalog.stories()[0].content;
    let retelling = &catalog.stories()[1].content;

    let mut group = c.benchmark_group("metrics");

    group.bench_function("similarity", |b| {
        b.iter(|| similarity(black_box(story), black_box(retelling)))
    });

    group.bench_function("fluency", |b| b.iter(|| fluency(black_box(story))));

    group.bench_function("coherence", |b| b.iter(|| coherence(black_box(story))));

    group.bench_function("vocabulary", |b| b.iter(|| vocabulary(black_box(story))));

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let catalog = BuiltinCatalog::new();
    let story = &catalog.stories()[2].content;
    let engine = ScoringEngine::lexical();
    let long_transcript = story.repeat(20);

    let mut group = c.benchmark_group("engine");

    group.bench_function("retelling", |b| {
        b.iter(|| engine.score_retelling(black_box(story), black_box(story)))
    });

    group.bench_function("practice", |b| {
        b.iter(|| engine.score_practice(black_box(story), black_box(95.0)))
    });

    group.bench_function("practice_long_transcript", |b| {
        b.iter(|| engine.score_practice(black_box(&long_transcript), black_box(1800.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_engine);
criterion_main!(benches);
