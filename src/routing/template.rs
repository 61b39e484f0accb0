//! Path template parsing.
//!
//! # Grammar
//! ```text
//! template  := ["/" | "~/"] segment ("/" segment)* ["/"]
//! segment   := literal | "{" parameter "}"
//! parameter := ["*" | "**"] name [":" constraint] ["?" | "=" default]
//! ```
//!
//! # Design Decisions
//! - A segment is either all literal or exactly one parameter
//! - Catch-all and optional parameters may only appear last
//! - Parameter names are unique, compared case-insensitively
//! - Errors carry the byte offset into the raw template

use crate::routing::error::{PatternError, PatternErrorKind};

/// Raw text of the implicit template used when a rule has no path.
pub const CATCH_ALL_TEMPLATE: &str = "/{**catchall}";

/// One `/`-separated piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the same text, ASCII case-insensitively.
    Literal(String),
    Parameter(Parameter),
}

/// How many request segments a parameter may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Exactly one segment.
    Required,
    /// Zero or one segment; only valid last.
    Optional,
    /// Zero or more segments; only valid last.
    CatchAll,
}

/// Value constraint attached with `{name:constraint}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Int,
    Long,
    Bool,
    Alpha,
    Guid,
}

impl Constraint {
    fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "int" => Some(Constraint::Int),
            "long" => Some(Constraint::Long),
            "bool" => Some(Constraint::Bool),
            "alpha" => Some(Constraint::Alpha),
            "guid" => Some(Constraint::Guid),
            _ => None,
        }
    }

    /// Returns true if `value` satisfies the constraint.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Constraint::Int => value.parse::<i32>().is_ok(),
            Constraint::Long => value.parse::<i64>().is_ok(),
            Constraint::Bool => {
                value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
            }
            Constraint::Alpha => !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphabetic()),
            Constraint::Guid => uuid::Uuid::parse_str(value).is_ok(),
        }
    }
}

/// A named template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub constraint: Option<Constraint>,
    /// Captured when the (optional) segment is absent from the request.
    pub default: Option<String>,
}

impl Parameter {
    /// Returns true if `value` is an acceptable capture for this parameter.
    pub fn accepts(&self, value: &str) -> bool {
        self.constraint.map_or(true, |c| c.accepts(value))
    }
}

/// Parse a non-empty path template into its segments.
pub fn parse(rule_id: &str, template: &str) -> Result<Vec<Segment>, PatternError> {
    let err = |position: usize, kind: PatternErrorKind| {
        PatternError::path(rule_id, template, position, kind)
    };

    let offset = if template.starts_with("~/") {
        2
    } else if template.starts_with('/') {
        1
    } else {
        0
    };
    let body = &template[offset..];

    // A lone "/" (or "~/") is the root template.
    if body.is_empty() {
        return Ok(Vec::new());
    }

    // One trailing slash is tolerated and does not form a segment.
    let body = body.strip_suffix('/').unwrap_or(body);

    let raw_segments: Vec<(usize, &str)> = {
        let mut start = offset;
        body.split('/')
            .map(|s| {
                let item = (start, s);
                start += s.len() + 1;
                item
            })
            .collect()
    };
    let count = raw_segments.len();

    let mut segments = Vec::with_capacity(count);
    let mut names: Vec<String> = Vec::new();

    for (index, &(start, text)) in raw_segments.iter().enumerate() {
        let is_last = index + 1 == count;

        if text.is_empty() {
            return Err(err(start, PatternErrorKind::EmptySegment));
        }

        if !text.contains(['{', '}']) {
            if let Some(pos) = text.find(['?', '#']) {
                let c = text[pos..].chars().next().unwrap_or('?');
                return Err(err(start + pos, PatternErrorKind::InvalidCharacter(c)));
            }
            segments.push(Segment::Literal(text.to_string()));
            continue;
        }

        if !text.starts_with('{') {
            let open = text.find('{');
            let close = text.find('}');
            return Err(match (open, close) {
                (_, Some(c)) if open.map_or(true, |o| c < o) => {
                    err(start + c, PatternErrorKind::UnbalancedBrace('}'))
                }
                (Some(o), None) => err(start + o, PatternErrorKind::UnbalancedBrace('{')),
                _ => err(start, PatternErrorKind::ComplexSegment),
            });
        }

        let Some(close) = text.find('}') else {
            return Err(err(start, PatternErrorKind::UnbalancedBrace('{')));
        };
        let inner = &text[1..close];
        if let Some(pos) = inner.find('{') {
            return Err(err(start + 1 + pos, PatternErrorKind::UnbalancedBrace('{')));
        }
        if close + 1 != text.len() {
            return Err(err(start + close + 1, PatternErrorKind::ComplexSegment));
        }

        let parameter = parse_parameter(inner, start + 1, &err)?;

        match parameter.kind {
            ParameterKind::CatchAll if !is_last => {
                return Err(err(start, PatternErrorKind::CatchAllNotLast(parameter.name)));
            }
            ParameterKind::Optional if !is_last => {
                return Err(err(start, PatternErrorKind::OptionalNotLast(parameter.name)));
            }
            _ => {}
        }

        if names.iter().any(|n| n.eq_ignore_ascii_case(&parameter.name)) {
            return Err(err(start, PatternErrorKind::DuplicateParameter(parameter.name)));
        }
        names.push(parameter.name.clone());
        segments.push(Segment::Parameter(parameter));
    }

    Ok(segments)
}

/// Parse the text between the braces of a parameter segment.
fn parse_parameter(
    inner: &str,
    base: usize,
    err: &impl Fn(usize, PatternErrorKind) -> PatternError,
) -> Result<Parameter, PatternError> {
    let (catch_all, stars) = if inner.starts_with("**") {
        (true, 2)
    } else if inner.starts_with('*') {
        (true, 1)
    } else {
        (false, 0)
    };
    let rest = &inner[stars..];

    let name_end = rest.find([':', '=', '?']).unwrap_or(rest.len());
    let name = &rest[..name_end];
    if name.is_empty() {
        return Err(err(base + stars, PatternErrorKind::EmptyParameterName));
    }
    if let Some((pos, c)) = name
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'))
    {
        return Err(err(base + stars + pos, PatternErrorKind::InvalidCharacter(c)));
    }

    let mut tail = &rest[name_end..];
    let mut tail_pos = base + stars + name_end;

    let mut constraint = None;
    if let Some(after) = tail.strip_prefix(':') {
        let end = after.find(['=', '?']).unwrap_or(after.len());
        let text = &after[..end];
        constraint = Some(
            Constraint::parse(text)
                .ok_or_else(|| err(tail_pos + 1, PatternErrorKind::UnknownConstraint(text.to_string())))?,
        );
        tail = &after[end..];
        tail_pos += 1 + end;
    }

    let mut kind = if catch_all {
        ParameterKind::CatchAll
    } else {
        ParameterKind::Required
    };
    let mut default = None;

    if let Some(after) = tail.strip_prefix('?') {
        if catch_all || !after.is_empty() {
            return Err(err(tail_pos, PatternErrorKind::InvalidCharacter('?')));
        }
        kind = ParameterKind::Optional;
    } else if let Some(value) = tail.strip_prefix('=') {
        if let Some(pos) = value.find('?') {
            return Err(err(tail_pos + 1 + pos, PatternErrorKind::InvalidCharacter('?')));
        }
        if !catch_all {
            kind = ParameterKind::Optional;
        }
        default = Some(value.to_string());
    }

    Ok(Parameter {
        name: name.to_string(),
        kind,
        constraint,
        default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(template: &str) -> (Option<usize>, PatternErrorKind) {
        let e = parse("r", template).unwrap_err();
        assert_eq!(e.value, template);
        (e.position, e.kind)
    }

    #[test]
    fn test_parse_literals_and_parameters() {
        let segments = parse("r", "/api/{version}/users/{id:int}").unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::Literal("api".into()));
        match &segments[3] {
            Segment::Parameter(p) => {
                assert_eq!(p.name, "id");
                assert_eq!(p.kind, ParameterKind::Required);
                assert_eq!(p.constraint, Some(Constraint::Int));
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn test_parse_catch_all_and_optional() {
        let segments = parse("r", CATCH_ALL_TEMPLATE).unwrap();
        assert!(matches!(
            &segments[0],
            Segment::Parameter(Parameter { kind: ParameterKind::CatchAll, .. })
        ));

        let segments = parse("r", "/files/{*rest}").unwrap();
        assert!(matches!(
            &segments[1],
            Segment::Parameter(Parameter { kind: ParameterKind::CatchAll, .. })
        ));

        let segments = parse("r", "/page/{n=1}").unwrap();
        match &segments[1] {
            Segment::Parameter(p) => {
                assert_eq!(p.kind, ParameterKind::Optional);
                assert_eq!(p.default.as_deref(), Some("1"));
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn test_parse_root_and_trailing_slash() {
        assert!(parse("r", "/").unwrap().is_empty());
        assert_eq!(parse("r", "/a/").unwrap(), vec![Segment::Literal("a".into())]);
        assert_eq!(parse("r", "~/a").unwrap(), vec![Segment::Literal("a".into())]);
        assert_eq!(kind_of("//"), (Some(1), PatternErrorKind::EmptySegment));
        assert_eq!(kind_of("/a//"), (Some(3), PatternErrorKind::EmptySegment));
    }

    #[test]
    fn test_trailing_slash_after_last_parameter() {
        let segments = parse("r", "/files/{**rest}/").unwrap();
        assert_eq!(segments.len(), 2);
        assert!(matches!(
            &segments[1],
            Segment::Parameter(Parameter { kind: ParameterKind::CatchAll, .. })
        ));

        for template in ["/p/{id?}/", "/p/{id=1}/"] {
            let segments = parse("r", template).unwrap();
            assert!(matches!(
                &segments[1],
                Segment::Parameter(Parameter { kind: ParameterKind::Optional, .. })
            ));
        }
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(kind_of("/{invalid"), (Some(1), PatternErrorKind::UnbalancedBrace('{')));
        assert_eq!(kind_of("/a}"), (Some(2), PatternErrorKind::UnbalancedBrace('}')));
        assert_eq!(kind_of("/{a{b}"), (Some(3), PatternErrorKind::UnbalancedBrace('{')));
    }

    #[test]
    fn test_invalid_templates() {
        assert_eq!(kind_of("/a//b"), (Some(3), PatternErrorKind::EmptySegment));
        assert_eq!(kind_of("/a?b"), (Some(2), PatternErrorKind::InvalidCharacter('?')));
        assert_eq!(kind_of("/{}"), (Some(2), PatternErrorKind::EmptyParameterName));
        assert_eq!(kind_of("/x{id}"), (Some(1), PatternErrorKind::ComplexSegment));
        assert_eq!(kind_of("/{id}x"), (Some(5), PatternErrorKind::ComplexSegment));
        assert_eq!(kind_of("/{a b}"), (Some(3), PatternErrorKind::InvalidCharacter(' ')));
        assert_eq!(
            kind_of("/{id:number}"),
            (Some(5), PatternErrorKind::UnknownConstraint("number".into()))
        );
    }

    #[test]
    fn test_structural_rules() {
        assert_eq!(
            kind_of("/{*rest}/tail"),
            (Some(1), PatternErrorKind::CatchAllNotLast("rest".into()))
        );
        assert_eq!(
            kind_of("/{id?}/tail"),
            (Some(1), PatternErrorKind::OptionalNotLast("id".into()))
        );
        assert_eq!(
            kind_of("/{id}/{ID}"),
            (Some(6), PatternErrorKind::DuplicateParameter("ID".into()))
        );
        assert_eq!(kind_of("/{*rest?}"), (Some(7), PatternErrorKind::InvalidCharacter('?')));
    }

    #[test]
    fn test_constraints() {
        assert!(Constraint::Int.accepts("42"));
        assert!(!Constraint::Int.accepts("4x"));
        assert!(Constraint::Long.accepts("9000000000"));
        assert!(Constraint::Bool.accepts("TRUE"));
        assert!(Constraint::Alpha.accepts("abc"));
        assert!(!Constraint::Alpha.accepts("ab1"));
        assert!(Constraint::Guid.accepts("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!Constraint::Guid.accepts("not-a-guid"));
    }
}
