//! Route matching logic.
//!
//! # Responsibilities
//! - Compile host patterns and path templates into matchers
//! - Match host header (exact or single-label wildcard, case-insensitive)
//! - Match path segments against a template
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110)
//! - Literal path segments compare ASCII case-insensitively
//! - Empty condition = always matches (wildcard)
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;

use crate::routing::error::{PatternError, PatternErrorKind};
use crate::routing::template::{self, ParameterKind, Segment, CATCH_ALL_TEMPLATE};

/// The parts of an inbound request that routing looks at.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    /// Raw `Host` value, `name[:port]`.
    pub host: Option<&'a str>,
    pub path: &'a str,
}

impl<'a> RouteRequest<'a> {
    pub fn new(host: Option<&'a str>, path: &'a str) -> Self {
        Self { host, path }
    }
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &RouteRequest<'_>) -> bool;
}

/// Compile a rule's host list and path template.
///
/// Absent or empty inputs produce catch-all matchers.
pub fn compile(
    rule_id: &str,
    hosts: Option<&[String]>,
    path: Option<&str>,
) -> Result<(HostMatcher, PathMatcher), PatternError> {
    let host_matcher = match hosts {
        Some(hosts) => HostMatcher::compile(rule_id, hosts)?,
        None => HostMatcher::any(),
    };
    let path_matcher = match path {
        Some(template) if !template.is_empty() => PathMatcher::compile(rule_id, template)?,
        _ => PathMatcher::catch_all(),
    };
    Ok((host_matcher, path_matcher))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostName {
    Any,
    /// Lowercased hostname.
    Exact(String),
    /// Lowercased suffix including the leading dot, e.g. `.example.com`.
    Wildcard(String),
}

#[derive(Debug, Clone)]
struct HostPattern {
    raw: String,
    name: HostName,
    port: Option<u16>,
}

impl HostPattern {
    fn parse(rule_id: &str, raw: &str) -> Result<Self, PatternError> {
        let err = |position: Option<usize>, kind| PatternError::host(rule_id, raw, position, kind);

        if raw.is_empty() {
            return Err(err(None, PatternErrorKind::Empty));
        }

        let (name, port) = match raw.rsplit_once(':') {
            Some((name, port_text)) => {
                let port = port_text
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| {
                        err(Some(name.len() + 1), PatternErrorKind::InvalidPort(port_text.to_string()))
                    })?;
                (name, Some(port))
            }
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(err(Some(0), PatternErrorKind::Empty));
        }
        if name == "*" {
            return Ok(Self { raw: raw.to_string(), name: HostName::Any, port });
        }

        let (labels, offset, wildcard) = match name.strip_prefix("*.") {
            Some(rest) => (rest, 2, true),
            None => (name, 0, false),
        };

        let mut pos = offset;
        for label in labels.split('.') {
            if label.is_empty() {
                return Err(err(Some(pos), PatternErrorKind::EmptySegment));
            }
            if let Some((i, c)) = label
                .char_indices()
                .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            {
                let kind = if c == '*' {
                    PatternErrorKind::MisplacedWildcard
                } else {
                    PatternErrorKind::InvalidCharacter(c)
                };
                return Err(err(Some(pos + i), kind));
            }
            pos += label.len() + 1;
        }

        let lowered = labels.to_ascii_lowercase();
        let name = if wildcard {
            HostName::Wildcard(format!(".{lowered}"))
        } else {
            HostName::Exact(lowered)
        };
        Ok(Self { raw: raw.to_string(), name, port })
    }

    fn matches(&self, name: &str, port: Option<u16>) -> bool {
        if self.port.is_some() && self.port != port {
            return false;
        }
        match &self.name {
            HostName::Any => true,
            HostName::Exact(expected) => name.eq_ignore_ascii_case(expected),
            HostName::Wildcard(suffix) => {
                let name = name.as_bytes();
                let suffix = suffix.as_bytes();
                if name.len() <= suffix.len() {
                    return false;
                }
                let (label, tail) = name.split_at(name.len() - suffix.len());
                tail.eq_ignore_ascii_case(suffix) && !label.contains(&b'.')
            }
        }
    }
}

/// Split a raw `Host` value into name and port.
///
/// A fully qualified name's trailing root dot is dropped.
fn split_host(host: &str) -> (&str, Option<u16>) {
    let (name, port) = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (name, port.parse().ok())
        }
        _ => (host, None),
    };
    (name.strip_suffix('.').unwrap_or(name), port)
}

/// Matches the Host header against any of a list of patterns.
#[derive(Debug, Clone, Default)]
pub struct HostMatcher {
    patterns: Vec<HostPattern>,
}

impl HostMatcher {
    /// A matcher with no host constraint.
    pub fn any() -> Self {
        Self::default()
    }

    /// Compile host patterns; an empty list constrains nothing.
    pub fn compile(rule_id: &str, hosts: &[String]) -> Result<Self, PatternError> {
        let patterns = hosts
            .iter()
            .map(|h| HostPattern::parse(rule_id, h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if no host constraint is attached.
    pub fn is_any(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The configured patterns, verbatim.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    /// Returns true if `host` satisfies any configured pattern.
    pub fn matches_host(&self, host: Option<&str>) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let Some(host) = host else {
            return false;
        };
        let (name, port) = split_host(host);
        self.patterns.iter().any(|p| p.matches(name, port))
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        self.matches_host(req.host)
    }
}

/// Matches the request path against a compiled template.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    raw: String,
    segments: Vec<Segment>,
}

impl PathMatcher {
    /// The `/{**catchall}` matcher used when a rule has no path.
    pub fn catch_all() -> Self {
        Self {
            raw: CATCH_ALL_TEMPLATE.to_string(),
            segments: vec![Segment::Parameter(template::Parameter {
                name: "catchall".to_string(),
                kind: ParameterKind::CatchAll,
                constraint: None,
                default: None,
            })],
        }
    }

    /// Compile a non-empty path template.
    pub fn compile(rule_id: &str, template: &str) -> Result<Self, PatternError> {
        Ok(Self {
            raw: template.to_string(),
            segments: template::parse(rule_id, template)?,
        })
    }

    /// The template text this matcher was compiled from.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Returns true if this matcher accepts any path.
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::Parameter(p)] if p.kind == ParameterKind::CatchAll && p.constraint.is_none()
        )
    }

    /// Returns true if `path` is consistent with the template.
    pub fn matches_path(&self, path: &str) -> bool {
        self.walk(path, None)
    }

    /// Match `path`, returning the captured parameter values.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut values = HashMap::new();
        self.walk(path, Some(&mut values)).then_some(values)
    }

    fn walk(&self, path: &str, mut values: Option<&mut HashMap<String, String>>) -> bool {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        for (i, segment) in self.segments.iter().enumerate() {
            let part = parts.get(i).copied();
            match segment {
                Segment::Literal(expected) => match part {
                    Some(p) if p.eq_ignore_ascii_case(expected) => {}
                    _ => return false,
                },
                Segment::Parameter(param) => match param.kind {
                    ParameterKind::Required => match part {
                        Some(p) if !p.is_empty() && param.accepts(p) => {
                            capture(&mut values, &param.name, p);
                        }
                        _ => return false,
                    },
                    ParameterKind::Optional => match part {
                        Some(p) if !p.is_empty() && param.accepts(p) => {
                            capture(&mut values, &param.name, p);
                        }
                        Some(_) => return false,
                        None => {
                            if let Some(d) = &param.default {
                                capture(&mut values, &param.name, d);
                            }
                        }
                    },
                    ParameterKind::CatchAll => {
                        let rest = parts.get(i..).map(|r| r.join("/")).unwrap_or_default();
                        if rest.is_empty() {
                            if let Some(d) = &param.default {
                                capture(&mut values, &param.name, d);
                            }
                            return true;
                        }
                        if !param.accepts(&rest) {
                            return false;
                        }
                        capture(&mut values, &param.name, &rest);
                        return true;
                    }
                },
            }
        }

        parts.len() <= self.segments.len()
    }
}

fn capture(values: &mut Option<&mut HashMap<String, String>>, name: &str, value: &str) {
    if let Some(values) = values.as_deref_mut() {
        values.insert(name.to_string(), value.to_string());
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        self.matches_path(req.path)
    }
}
