//! Route table storage and lookup.
//!
//! # Responsibilities
//! - Rebuild the table from a batch of rules, reusing unchanged entries
//! - Publish the new table atomically
//! - Look up the matching route for a request
//!
//! # Design Decisions
//! - Tables are immutable after construction (thread-safe without locks)
//! - Readers load one snapshot per request and never see a mixed table
//! - Ordered by priority ascending, ties broken by rule id
//! - First match wins; explicit `None` rather than a silent default
//! - Rebuilds must be serialized by the caller (one writer per rule)

use arc_swap::ArcSwap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cluster::ClusterHandle;
use crate::config::{FailurePolicy, TableConfig};
use crate::observability::metrics;
use crate::routing::compiler::RouteCompiler;
use crate::routing::entry::CompiledEntry;
use crate::routing::error::RebuildError;
use crate::routing::fingerprint::fingerprint;
use crate::routing::rule::NormalizedRule;
use crate::routing::state::RouteState;

/// One rule as supplied to a rebuild, with its cluster and runtime state.
#[derive(Debug, Clone)]
pub struct RouteSource {
    pub rule: NormalizedRule,
    pub cluster: ClusterHandle,
    pub state: Arc<RouteState>,
}

impl RouteSource {
    pub fn new(rule: NormalizedRule, cluster: ClusterHandle, state: Arc<RouteState>) -> Self {
        Self { rule, cluster, state }
    }
}

impl From<(NormalizedRule, ClusterHandle, Arc<RouteState>)> for RouteSource {
    fn from((rule, cluster, state): (NormalizedRule, ClusterHandle, Arc<RouteState>)) -> Self {
        Self::new(rule, cluster, state)
    }
}

/// A successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub entry: Arc<CompiledEntry>,
    /// Values captured by the path template's parameters.
    pub params: HashMap<String, String>,
}

/// An immutable, priority-ordered set of compiled entries.
#[derive(Debug, Default)]
pub struct RouteTable {
    generation: u64,
    entries: Vec<Arc<CompiledEntry>>,
}

impl RouteTable {
    fn new(generation: u64, mut entries: Vec<Arc<CompiledEntry>>) -> Self {
        entries.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
        Self { generation, entries }
    }

    /// Rebuild counter; the initial empty table is generation 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[Arc<CompiledEntry>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledEntry>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by rule id.
    pub fn get(&self, rule_id: &str) -> Option<&Arc<CompiledEntry>> {
        self.entries.iter().find(|e| e.rule_id == rule_id)
    }

    /// Find the highest-precedence entry accepting `host` and `path`.
    pub fn find(&self, host: Option<&str>, path: &str) -> Option<RouteMatch> {
        self.entries.iter().find_map(|entry| {
            if !entry.hosts.matches_host(host) {
                return None;
            }
            entry.path.captures(path).map(|params| RouteMatch {
                entry: entry.clone(),
                params,
            })
        })
    }
}

/// Outcome of one rebuild.
#[derive(Debug)]
pub struct RebuildOutcome {
    /// The table that was published.
    pub table: Arc<RouteTable>,
    /// One error per rule that could not be included as requested.
    pub errors: Vec<RebuildError>,
    /// Rules compiled from scratch.
    pub compiled: usize,
    /// Rules whose previous entry was carried over.
    pub reused: usize,
}

impl RebuildOutcome {
    /// Returns true if every rule made it into the table.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Owner of the live route table.
#[derive(Debug)]
pub struct Router {
    table: ArcSwap<RouteTable>,
    compiler: RouteCompiler,
    config: TableConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with an empty table and default settings.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTable::default()),
            compiler: RouteCompiler::new(),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The current table. Lock-free; hold it for a whole dispatch decision.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Compile `sources` and publish the result as the new table.
    ///
    /// Every rule is attempted. Rules that fail are reported in the outcome
    /// and handled per [`TableConfig::on_error`]; the rest are published.
    pub fn rebuild(&self, sources: &[RouteSource]) -> RebuildOutcome {
        let generation = self.table.load().generation() + 1;
        let mut seen: HashSet<&str> = HashSet::with_capacity(sources.len());
        let mut entries = Vec::with_capacity(sources.len());
        let mut errors = Vec::new();
        let mut compiled = 0;
        let mut reused = 0;

        for source in sources {
            let rule = &source.rule;

            if !seen.insert(rule.id.as_str()) {
                tracing::warn!(rule_id = %rule.id, "Duplicate route id, ignoring later definition");
                metrics::record_rule_error("duplicate");
                errors.push(RebuildError::DuplicateRule {
                    rule_id: rule.id.clone(),
                });
                continue;
            }

            if source.state.id() != rule.id {
                tracing::warn!(
                    rule_id = %rule.id,
                    state_id = %source.state.id(),
                    "Runtime state belongs to another route, skipping"
                );
                metrics::record_rule_error("state_mismatch");
                errors.push(RebuildError::StateMismatch {
                    rule_id: rule.id.clone(),
                    state_id: source.state.id().to_string(),
                });
                continue;
            }

            if self.config.reuse_unchanged {
                if let Some(existing) = source.state.current() {
                    if existing.is_current(fingerprint(rule), &source.cluster) {
                        tracing::debug!(rule_id = %rule.id, "Route unchanged, reusing compiled entry");
                        reused += 1;
                        entries.push(existing);
                        continue;
                    }
                }
            }

            match self.compiler.build(rule, &source.cluster, &source.state) {
                Ok(entry) => {
                    compiled += 1;
                    entries.push(entry);
                }
                Err(e) => {
                    tracing::warn!(rule_id = %rule.id, error = %e, "Route failed to compile");
                    metrics::record_rule_error("pattern");
                    match self.config.on_error {
                        FailurePolicy::Drop => source.state.invalidate(),
                        FailurePolicy::KeepPrevious => {
                            if let Some(previous) = source
                                .state
                                .current()
                                .filter(|previous| previous.rule_id == rule.id)
                            {
                                tracing::info!(rule_id = %rule.id, "Keeping previous compiled entry");
                                entries.push(previous);
                            }
                        }
                    }
                    errors.push(e.into());
                }
            }
        }

        let table = Arc::new(RouteTable::new(generation, entries));
        self.table.store(table.clone());

        tracing::info!(
            generation,
            entries = table.len(),
            compiled,
            reused,
            errors = errors.len(),
            "Route table published"
        );
        metrics::record_rebuild(compiled, reused, table.len());

        RebuildOutcome {
            table,
            errors,
            compiled,
            reused,
        }
    }
}
