//! Compiled routing entries.

use std::sync::Arc;

use crate::cluster::ClusterHandle;
use crate::routing::matcher::{HostMatcher, Matcher, PathMatcher, RouteRequest};
use crate::routing::policy::{AuthorizationPolicy, CorsPolicy};

/// The match-ready form of one rule for one rebuild generation.
///
/// Immutable once built; recompiling a rule produces a new entry.
#[derive(Debug)]
pub struct CompiledEntry {
    pub rule_id: String,
    pub cluster: ClusterHandle,
    pub hosts: Arc<HostMatcher>,
    pub path: Arc<PathMatcher>,
    /// Lower value = higher precedence.
    pub priority: i32,
    pub authorization: AuthorizationPolicy,
    pub cors: CorsPolicy,
    /// Fingerprint of the rule this entry was compiled from.
    pub fingerprint: u64,
}

impl CompiledEntry {
    /// Returns true if this entry was compiled from a rule with `fingerprint`
    /// against the same cluster handle.
    pub fn is_current(&self, fingerprint: u64, cluster: &ClusterHandle) -> bool {
        self.fingerprint == fingerprint && Arc::ptr_eq(&self.cluster, cluster)
    }

    /// Shorthand for matching a host/path pair.
    pub fn accepts(&self, host: Option<&str>, path: &str) -> bool {
        self.matches(&RouteRequest::new(host, path))
    }
}

impl Matcher for CompiledEntry {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        // Both dimensions must pass (AND)
        self.hosts.matches(req) && self.path.matches(req)
    }
}
