use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use featurerank::{FeaturePipeline, FeatureRankConfig, PartialRice, RiceOverrides};
use featurerank_clustering::ClusterEngine;
use featurerank_core::traits::IEmbeddingProvider;
use test_fixtures::{load_feedback, StubEmbedder};

fn bench_pipeline(c: &mut Criterion) {
    let items = load_feedback("product_feedback");
    let pipeline =
        FeaturePipeline::new(FeatureRankConfig::default(), Arc::new(StubEmbedder::default()))
            .unwrap();
    let overrides = (0..5).fold(RiceOverrides::new(), |o, i| {
        o.for_cluster(i, PartialRice::new().with_impact(3.0).with_effort(2.0))
    });

    c.bench_function("cluster_and_score/product_feedback", |b| {
        b.iter(|| {
            pipeline
                .cluster_and_score(black_box(items.clone()), None, &overrides, None)
                .unwrap()
        })
    });
}

fn bench_kmeans(c: &mut Criterion) {
    let embedder = StubEmbedder::new(128);
    let texts: Vec<String> = (0..500)
        .map(|i| format!("feedback item {} about topic{} and area{}", i, i % 17, i % 5))
        .collect();
    let vectors = embedder.embed_batch(&texts).unwrap();
    let engine = ClusterEngine::default();

    c.bench_function("kmeans/500x128/k8", |b| {
        b.iter(|| engine.partition(black_box(&vectors), Some(8)).unwrap())
    });
}

criterion_group!(benches, bench_pipeline, bench_kmeans);
criterion_main!(benches);
