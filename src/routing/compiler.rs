//! Route compilation.
//!
//! # Responsibilities
//! - Fingerprint a rule
//! - Compile its host/path matchers
//! - Resolve its authorization and CORS policies
//! - Publish the resulting entry into the rule's runtime state
//!
//! # Design Decisions
//! - Pattern errors propagate unchanged; nothing is published on error
//! - Every build allocates a fresh entry, old entries are never mutated

use std::sync::Arc;

use crate::cluster::ClusterHandle;
use crate::routing::entry::CompiledEntry;
use crate::routing::error::PatternError;
use crate::routing::fingerprint::fingerprint;
use crate::routing::matcher;
use crate::routing::policy::{resolve_authorization, resolve_cors};
use crate::routing::rule::NormalizedRule;
use crate::routing::state::RouteState;

/// Builds compiled entries from normalized rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteCompiler;

impl RouteCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile `rule` against `cluster` and publish the result into `state`.
    ///
    /// On error `state` keeps whatever it held before.
    pub fn build(
        &self,
        rule: &NormalizedRule,
        cluster: &ClusterHandle,
        state: &RouteState,
    ) -> Result<Arc<CompiledEntry>, PatternError> {
        debug_assert_eq!(state.id(), rule.id, "runtime state belongs to another rule");

        let fingerprint = fingerprint(rule);
        let (hosts, path) = matcher::compile(&rule.id, rule.hosts.as_deref(), rule.path.as_deref())?;

        let entry = Arc::new(CompiledEntry {
            rule_id: rule.id.clone(),
            cluster: cluster.clone(),
            hosts: Arc::new(hosts),
            path: Arc::new(path),
            priority: rule.priority,
            authorization: resolve_authorization(rule.authorization_policy.as_deref()),
            cors: resolve_cors(rule.cors_policy.as_deref()),
            fingerprint,
        });

        state.publish(entry.clone());

        tracing::debug!(
            rule_id = %rule.id,
            cluster = %cluster.id(),
            path = %entry.path.raw_text(),
            priority = rule.priority,
            "Route compiled"
        );
        Ok(entry)
    }
}
