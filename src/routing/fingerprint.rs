//! Rule identity fingerprints.
//!
//! A fingerprint summarizes the fields of a rule that affect its compiled
//! form. It is a change-detection aid, not a cryptographic digest.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::routing::rule::NormalizedRule;

/// Compute the fingerprint of a rule.
///
/// `DefaultHasher::new()` uses fixed keys, so equal rules hash equally for
/// the life of the process. Lists hash with their length, which keeps host
/// order significant and field boundaries unambiguous.
pub fn fingerprint(rule: &NormalizedRule) -> u64 {
    let mut hasher = DefaultHasher::new();
    rule.id.hash(&mut hasher);
    rule.hosts.hash(&mut hasher);
    rule.path.hash(&mut hasher);
    rule.priority.hash(&mut hasher);
    rule.authorization_policy.hash(&mut hasher);
    rule.cors_policy.hash(&mut hasher);
    hasher.finish()
}
