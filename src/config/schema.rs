//! Configuration schema definitions.
//!
//! Settings for the routing core itself. Route and cluster definitions come
//! from the external configuration source and are not part of this schema.

use serde::{Deserialize, Serialize};

/// Root configuration for the routing core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Route table rebuild behavior.
    pub table: TableConfig,
}

/// What a rebuild does with a rule that fails to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the rule out of the new table and invalidate its state.
    #[default]
    Drop,
    /// Keep the rule's last good entry, if it has one.
    KeepPrevious,
}

/// Route table rebuild configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    /// Handling of rules whose patterns fail to compile.
    pub on_error: FailurePolicy,

    /// Reuse entries whose rule fingerprint and cluster are unchanged.
    pub reuse_unchanged: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            on_error: FailurePolicy::Drop,
            reuse_unchanged: true,
        }
    }
}
