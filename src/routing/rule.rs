//! Normalized routing rules.

use serde::{Deserialize, Serialize};

/// A declarative routing rule, as produced by the configuration source.
///
/// Read-only to the routing core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct NormalizedRule {
    /// Unique rule identifier.
    pub id: String,

    /// Host patterns; absent or empty means any host.
    #[serde(default)]
    pub hosts: Option<Vec<String>>,

    /// Path template; absent or empty means `/{**catchall}`.
    #[serde(default)]
    pub path: Option<String>,

    /// Match precedence (lower = checked first).
    #[serde(default)]
    pub priority: i32,

    /// Authorization policy name, `default`, or absent.
    #[serde(default)]
    pub authorization_policy: Option<String>,

    /// CORS policy name, `default`, `disable`, or absent.
    #[serde(default)]
    pub cors_policy: Option<String>,
}

impl NormalizedRule {
    /// Create a rule with only an identifier; everything else is a catch-all.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = Some(hosts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_authorization_policy(mut self, name: impl Into<String>) -> Self {
        self.authorization_policy = Some(name.into());
        self
    }

    pub fn with_cors_policy(mut self, name: impl Into<String>) -> Self {
        self.cors_policy = Some(name.into());
        self
    }
}
