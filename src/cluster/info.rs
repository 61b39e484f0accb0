//! Cluster identity and destination set.

use dashmap::DashMap;
use std::sync::Arc;

use crate::cluster::destination::Destination;

/// Shared reference to a cluster; this is what compiled routes hold.
pub type ClusterHandle = Arc<ClusterInfo>;

/// A named group of backend destinations.
#[derive(Debug)]
pub struct ClusterInfo {
    id: String,
    /// Map of destination id -> destination.
    destinations: DashMap<String, Destination>,
}

impl ClusterInfo {
    /// Create an empty cluster.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            destinations: DashMap::new(),
        }
    }

    /// Create a cluster and wrap it in a handle.
    pub fn handle(id: impl Into<String>) -> ClusterHandle {
        Arc::new(Self::new(id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add or replace a destination.
    pub fn upsert_destination(&self, destination: Destination) {
        self.destinations.insert(destination.id.clone(), destination);
    }

    /// Remove a destination, returning it if it existed.
    pub fn remove_destination(&self, id: &str) -> Option<Destination> {
        self.destinations.remove(id).map(|(_, d)| d)
    }

    /// Get a copy of a destination.
    pub fn destination(&self, id: &str) -> Option<Destination> {
        self.destinations.get(id).map(|r| r.value().clone())
    }

    /// Snapshot of all destinations, sorted by id.
    pub fn destinations(&self) -> Vec<Destination> {
        let mut all: Vec<_> = self.destinations.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }
}
