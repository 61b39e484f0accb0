//! Authorization and CORS policy resolution.
//!
//! # Responsibilities
//! - Turn a rule's policy names into tagged policy values
//! - Apply the `default` / `disable` sentinel names
//!
//! # Design Decisions
//! - Sentinels compare case-insensitively, custom names are kept verbatim
//! - Absent (or empty) name = no directive attached
//! - Enabled and disabled CORS are variants of one enum, never both

use serde::Serialize;

/// Name that selects the host's default policy.
pub const DEFAULT_POLICY: &str = "default";

/// Name that turns CORS off for a route.
pub const DISABLE_POLICY: &str = "disable";

/// Authorization requirement attached to a compiled route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "policy", rename_all = "snake_case")]
pub enum AuthorizationPolicy {
    /// No requirement attached; the host's ambient behavior applies.
    NotRequired,
    /// Requires the host's default authorization policy.
    RequiredDefault,
    /// Requires the named policy.
    RequiredNamed(String),
}

impl AuthorizationPolicy {
    /// Returns true if the route requires authorization.
    pub fn is_required(&self) -> bool {
        !matches!(self, AuthorizationPolicy::NotRequired)
    }

    /// The named policy to enforce, if one was given.
    pub fn policy_name(&self) -> Option<&str> {
        match self {
            AuthorizationPolicy::RequiredNamed(name) => Some(name),
            _ => None,
        }
    }
}

/// CORS directive attached to a compiled route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "policy", rename_all = "snake_case")]
pub enum CorsPolicy {
    /// Neither enabled nor disabled; the host's ambient CORS behavior applies.
    Ambient,
    /// CORS enabled with the host's default policy.
    EnabledDefault,
    /// CORS enabled with the named policy.
    EnabledNamed(String),
    /// CORS explicitly disabled.
    Disabled,
}

impl CorsPolicy {
    pub fn is_enabled(&self) -> bool {
        matches!(self, CorsPolicy::EnabledDefault | CorsPolicy::EnabledNamed(_))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, CorsPolicy::Disabled)
    }

    /// The named policy to apply, if one was given.
    pub fn policy_name(&self) -> Option<&str> {
        match self {
            CorsPolicy::EnabledNamed(name) => Some(name),
            _ => None,
        }
    }
}

fn present(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

/// Resolve a rule's authorization policy name.
pub fn resolve_authorization(name: Option<&str>) -> AuthorizationPolicy {
    match present(name) {
        None => AuthorizationPolicy::NotRequired,
        Some(n) if n.eq_ignore_ascii_case(DEFAULT_POLICY) => AuthorizationPolicy::RequiredDefault,
        Some(n) => AuthorizationPolicy::RequiredNamed(n.to_string()),
    }
}

/// Resolve a rule's CORS policy name.
pub fn resolve_cors(name: Option<&str>) -> CorsPolicy {
    match present(name) {
        None => CorsPolicy::Ambient,
        Some(n) if n.eq_ignore_ascii_case(DEFAULT_POLICY) => CorsPolicy::EnabledDefault,
        Some(n) if n.eq_ignore_ascii_case(DISABLE_POLICY) => CorsPolicy::Disabled,
        Some(n) => CorsPolicy::EnabledNamed(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_resolution() {
        assert_eq!(resolve_authorization(None), AuthorizationPolicy::NotRequired);
        assert_eq!(resolve_authorization(Some("")), AuthorizationPolicy::NotRequired);
        assert_eq!(resolve_authorization(Some("defaulT")), AuthorizationPolicy::RequiredDefault);
        assert_eq!(
            resolve_authorization(Some("defaulT")),
            resolve_authorization(Some("default"))
        );

        let custom = resolve_authorization(Some("Custom"));
        assert_eq!(custom, AuthorizationPolicy::RequiredNamed("Custom".into()));
        assert!(custom.is_required());
        assert_eq!(custom.policy_name(), Some("Custom"));
        assert_eq!(AuthorizationPolicy::RequiredDefault.policy_name(), None);
        assert!(!AuthorizationPolicy::NotRequired.is_required());
    }

    #[test]
    fn test_cors_resolution() {
        let ambient = resolve_cors(None);
        assert_eq!(ambient, CorsPolicy::Ambient);
        assert!(!ambient.is_enabled() && !ambient.is_disabled());

        let default = resolve_cors(Some("defaulT"));
        assert_eq!(default, CorsPolicy::EnabledDefault);
        assert!(default.is_enabled() && !default.is_disabled());
        assert_eq!(default.policy_name(), None);

        let disabled = resolve_cors(Some("disAble"));
        assert_eq!(disabled, CorsPolicy::Disabled);
        assert!(disabled.is_disabled() && !disabled.is_enabled());

        let custom = resolve_cors(Some("custom"));
        assert_eq!(custom.policy_name(), Some("custom"));
        assert!(custom.is_enabled() && !custom.is_disabled());
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_value(AuthorizationPolicy::RequiredNamed("admins".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "required_named", "policy": "admins" }));

        let json = serde_json::to_value(CorsPolicy::Disabled).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "disabled" }));
    }
}
