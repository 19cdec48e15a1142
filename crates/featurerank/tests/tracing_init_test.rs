//! Subscriber installation. Kept in its own test binary so nothing else
//! in the process has installed a global subscriber first.

use std::sync::Arc;

use featurerank::{init_tracing, FeaturePipeline, FeatureRankConfig, RiceOverrides};
use test_fixtures::{load_feedback, StubEmbedder};

#[test]
fn only_the_first_init_installs_a_subscriber() {
    let config = FeatureRankConfig::default();
    assert!(init_tracing(&config.observability));
    assert!(!init_tracing(&config.observability));

    let json = featurerank_core::config::ObservabilityConfig {
        json_logs: true,
        ..config.observability.clone()
    };
    assert!(!init_tracing(&json));

    // Runs with the installed subscriber emitting spans and events.
    let pipeline = FeaturePipeline::new(config, Arc::new(StubEmbedder::default())).unwrap();
    let report = pipeline
        .cluster_and_score(load_feedback("product_feedback"), Some(4), &RiceOverrides::new(), None)
        .unwrap();
    assert_eq!(report.summary.feedback_count, 16);
}
