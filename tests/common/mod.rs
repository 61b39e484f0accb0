//! Shared utilities for integration tests.

use std::sync::{Arc, Once};

use proxy_routing::routing::{RouteSource, RouteStates};
use proxy_routing::{ClusterHandle, NormalizedRule};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "proxy_routing=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Pair every rule with `cluster` and its runtime state from `states`.
pub fn sources(
    states: &RouteStates,
    cluster: &ClusterHandle,
    rules: &[NormalizedRule],
) -> Vec<RouteSource> {
    rules
        .iter()
        .map(|rule| {
            RouteSource::new(
                rule.clone(),
                Arc::clone(cluster),
                states.get_or_create(&rule.id),
            )
        })
        .collect()
}

/// Parse rules the way a JSON config source would hand them over.
#[allow(dead_code)]
pub fn rules_from_json(json: &str) -> Vec<NormalizedRule> {
    serde_json::from_str(json).expect("valid rule fixture")
}
