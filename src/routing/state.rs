//! Per-rule runtime state.
//!
//! # Responsibilities
//! - Hold the latest compiled form of one rule across rebuilds
//! - Hand out identity-stable handles, one per rule id
//!
//! # Design Decisions
//! - Pointer-to-latest cell (`ArcSwapOption`), readers never lock
//! - Single writer per rule (the rebuild driver), many readers
//! - `None` doubles as the explicit "invalid" marker

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::routing::entry::CompiledEntry;

/// Identity-stable holder of a rule's current compiled form.
#[derive(Debug)]
pub struct RouteState {
    id: String,
    current: ArcSwapOption<CompiledEntry>,
}

impl RouteState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            current: ArcSwapOption::empty(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The most recently published entry, if any.
    pub fn current(&self) -> Option<Arc<CompiledEntry>> {
        self.current.load_full()
    }

    /// Returns true if the rule currently has a compiled form.
    pub fn is_valid(&self) -> bool {
        self.current.load().is_some()
    }

    /// Replace the compiled form in one atomic store.
    pub(crate) fn publish(&self, entry: Arc<CompiledEntry>) {
        self.current.store(Some(entry));
    }

    /// Mark the rule as having no usable compiled form.
    pub fn invalidate(&self) {
        self.current.store(None);
    }
}

/// Registry of runtime states keyed by rule id.
#[derive(Debug, Default)]
pub struct RouteStates {
    states: DashMap<String, Arc<RouteState>>,
}

impl RouteStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state for `id`, creating it on first use.
    ///
    /// The same `Arc` is returned for an id until it is pruned.
    pub fn get_or_create(&self, id: &str) -> Arc<RouteState> {
        if let Some(existing) = self.states.get(id) {
            return existing.value().clone();
        }
        self.states
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(RouteState::new(id)))
            .value()
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<RouteState>> {
        self.states.get(id).map(|r| r.value().clone())
    }

    /// Drop states whose id is not in `live`. Returns how many were removed.
    pub fn retain<'a, I>(&self, live: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let live: HashSet<&str> = live.into_iter().collect();
        let mut removed = 0;
        self.states.retain(|id, _| {
            let keep = live.contains(id.as_str());
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
