//! Routing error definitions.

use std::fmt;
use thiserror::Error;

/// Which rule field an error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    /// A path template.
    PathTemplate,
    /// One entry of the host list.
    HostPattern,
}

impl fmt::Display for PatternSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSource::PathTemplate => write!(f, "path template"),
            PatternSource::HostPattern => write!(f, "host pattern"),
        }
    }
}

/// Reason a host pattern or path template was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    #[error("pattern is empty")]
    Empty,

    #[error("unbalanced '{0}'")]
    UnbalancedBrace(char),

    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("empty segment")]
    EmptySegment,

    #[error("parameter name is empty")]
    EmptyParameterName,

    #[error("parameter '{0}' is defined more than once")]
    DuplicateParameter(String),

    #[error("a segment cannot mix literal text and a parameter")]
    ComplexSegment,

    #[error("catch-all parameter '{0}' must be the last segment")]
    CatchAllNotLast(String),

    #[error("optional parameter '{0}' must be the last segment")]
    OptionalNotLast(String),

    #[error("unknown constraint '{0}'")]
    UnknownConstraint(String),

    #[error("wildcard must be the whole leftmost label")]
    MisplacedWildcard,

    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// A malformed path template or host pattern.
///
/// Always attributable to a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route '{rule_id}': invalid {source_kind} '{value}'{}: {kind}", fmt_position(.position))]
pub struct PatternError {
    /// Identifier of the rule that carried the value.
    pub rule_id: String,
    /// The offending raw value, verbatim.
    pub value: String,
    /// Byte offset into `value`, when known.
    pub position: Option<usize>,
    /// Which field the value came from.
    pub source_kind: PatternSource,
    pub kind: PatternErrorKind,
}

fn fmt_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at position {p}"),
        None => String::new(),
    }
}

impl PatternError {
    pub(crate) fn path(rule_id: &str, template: &str, position: usize, kind: PatternErrorKind) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            value: template.to_string(),
            position: Some(position),
            source_kind: PatternSource::PathTemplate,
            kind,
        }
    }

    pub(crate) fn host(rule_id: &str, pattern: &str, position: Option<usize>, kind: PatternErrorKind) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            value: pattern.to_string(),
            position,
            source_kind: PatternSource::HostPattern,
            kind,
        }
    }
}

/// Errors reported by a route table rebuild, one per offending rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebuildError {
    /// The rule's host or path failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The rule id was already seen earlier in the same batch.
    #[error("route '{rule_id}' is defined more than once")]
    DuplicateRule { rule_id: String },

    /// The supplied runtime state is owned by a different rule.
    #[error("route '{rule_id}' was given the runtime state of route '{state_id}'")]
    StateMismatch { rule_id: String, state_id: String },
}

impl RebuildError {
    /// Identifier of the rule this error belongs to.
    pub fn rule_id(&self) -> &str {
        match self {
            RebuildError::Pattern(e) => &e.rule_id,
            RebuildError::DuplicateRule { rule_id } => rule_id,
            RebuildError::StateMismatch { rule_id, .. } => rule_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_display() {
        let err = PatternError::path("route1", "/{invalid", 1, PatternErrorKind::UnbalancedBrace('{'));
        assert_eq!(
            err.to_string(),
            "route 'route1': invalid path template '/{invalid' at position 1: unbalanced '{'"
        );

        let err = PatternError::host("route1", "", None, PatternErrorKind::Empty);
        assert_eq!(err.to_string(), "route 'route1': invalid host pattern '': pattern is empty");
    }

    #[test]
    fn test_rebuild_error_rule_id() {
        let err = RebuildError::DuplicateRule { rule_id: "r1".into() };
        assert_eq!(err.rule_id(), "r1");
        assert_eq!(err.to_string(), "route 'r1' is defined more than once");

        let err: RebuildError =
            PatternError::path("r2", "//", 1, PatternErrorKind::EmptySegment).into();
        assert_eq!(err.rule_id(), "r2");

        let err = RebuildError::StateMismatch {
            rule_id: "r3".into(),
            state_id: "r4".into(),
        };
        assert_eq!(err.rule_id(), "r3");
        assert_eq!(err.to_string(), "route 'r3' was given the runtime state of route 'r4'");
    }
}
