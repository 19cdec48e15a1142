use proptest::prelude::*;

use featurerank_core::config::EmbeddingConfig;
use featurerank_core::traits::IEmbeddingProvider;
use featurerank_core::ErrorKind;
use featurerank_embeddings::EmbeddingEngine;

fn engine(dims: usize, parallel: bool) -> EmbeddingEngine {
    EmbeddingEngine::new(EmbeddingConfig {
        dimensions: dims,
        batch_size: 4,
        parallel,
        ..Default::default()
    })
}

#[test]
fn large_batch_keeps_order_and_cardinality() {
    let texts: Vec<String> = (0..250)
        .map(|i| format!("feedback item {i} about topic {}", i % 7))
        .collect();
    let e = engine(128, true);
    let vectors = e.embed_texts(&texts).unwrap();
    assert_eq!(vectors.len(), texts.len());

    for (i, text) in texts.iter().enumerate().step_by(37) {
        let single = e.embed(text).unwrap();
        assert_eq!(single, vectors[i], "order mismatch at {i}");
    }
}

#[test]
fn parallel_and_sequential_engines_agree() {
    let texts: Vec<String> = (0..40).map(|i| format!("request {i} for reporting")).collect();
    let a = engine(96, true).embed_texts(&texts).unwrap();
    let b = engine(96, false).embed_texts(&texts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn punctuation_only_text_is_not_blank() {
    let v = engine(16, false).embed_texts(&["!!!".to_string()]).unwrap();
    assert_eq!(v[0].len(), 16);
}

#[test]
fn whitespace_only_text_fails() {
    let err = engine(16, false)
        .embed_texts(&["fine".to_string(), "\n\t ".to_string()])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

proptest! {
    #[test]
    fn prop_fixed_dimensionality_and_deterministic(text in "[a-zA-Z]{1,12}( [a-zA-Z]{1,12}){0,8}") {
        let e = engine(64, false);
        let first = e.embed(&text).unwrap();
        let fresh = engine(64, false).embed(&text).unwrap();
        prop_assert_eq!(first.len(), 64);
        prop_assert_eq!(first, fresh);
    }
}
