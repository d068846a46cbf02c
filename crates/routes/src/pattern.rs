//! Route pattern parsing and matching.
//!
//! Patterns use the axum path syntax: literal segments and `{name}`
//! parameters, e.g. `/items/{id}/edit`.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::BTreeMap;

use menukit_core::{Result, RouteError};

/// Characters percent-encoded when substituting a value into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl RoutePattern {
    /// Parse an axum-style path pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |detail: &str| -> menukit_core::Error {
            RouteError::InvalidPattern {
                pattern: pattern.to_string(),
                detail: detail.to_string(),
            }
            .into()
        };

        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let trimmed = pattern.trim_start_matches('/');
        let trailing_slash = pattern.len() > 1 && pattern.ends_with('/');
        let mut segments = Vec::new();

        for part in trimmed.trim_end_matches('/').split('/') {
            if part.is_empty() {
                if trimmed.trim_end_matches('/').is_empty() {
                    break;
                }
                return Err(invalid("empty path segment"));
            }
            if let Some(name) = part.strip_prefix('{') {
                let Some(name) = name.strip_suffix('}') else {
                    return Err(invalid("unbalanced braces"));
                };
                if name.is_empty() {
                    return Err(invalid("empty parameter name"));
                }
                if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid("parameter names must be alphanumeric"));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains('{') || part.contains('}') {
                return Err(invalid("unbalanced braces"));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
            trailing_slash,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in path order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Build a concrete path, filling parameters positionally.
    pub fn fill_positional(&self, route: &str, args: &[&str]) -> Result<String> {
        let wanted = self.param_names().len();
        if args.len() != wanted {
            return Err(RouteError::ArgumentMismatch {
                route: route.to_string(),
                detail: format!("expected {wanted} argument(s), got {}", args.len()),
            }
            .into());
        }
        let mut args = args.iter();
        self.build(move |_| args.next().copied())
    }

    /// Build a concrete path, filling parameters by name.
    pub fn fill_named(&self, route: &str, kwargs: &BTreeMap<&str, String>) -> Result<String> {
        for name in self.param_names() {
            if !kwargs.contains_key(name) {
                return Err(RouteError::ArgumentMismatch {
                    route: route.to_string(),
                    detail: format!("missing argument '{name}'"),
                }
                .into());
            }
        }
        self.build(move |name| kwargs.get(name).map(String::as_str))
    }

    fn build<'v>(&self, mut value_for: impl FnMut(&str) -> Option<&'v str>) -> Result<String> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = value_for(name).ok_or_else(|| {
                        menukit_core::Error::Internal(format!("no value for parameter '{name}'"))
                    })?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        } else if self.trailing_slash {
            path.push('/');
        }
        Ok(path)
    }

    /// Match a request path against this pattern, capturing parameters.
    ///
    /// Trailing slashes are significant, matching axum's routing.
    pub fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        if !path.starts_with('/') {
            return None;
        }
        let trailing_slash = path.len() > 1 && path.ends_with('/');
        if trailing_slash != self.trailing_slash {
            return None;
        }
        let parts: Vec<&str> = path
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) => {
                    if text != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_fill_positional() {
        let pattern = RoutePattern::parse("/intpath/{int}").unwrap();
        assert_eq!(pattern.param_names(), ["int"]);
        assert_eq!(pattern.fill_positional("int_path", &["5"]).unwrap(), "/intpath/5");
    }

    #[test]
    fn fill_named_requires_all_params() {
        let pattern = RoutePattern::parse("/items/{id}/edit").unwrap();
        let err = pattern.fill_named("edit", &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("missing argument 'id'"));

        let mut kwargs = BTreeMap::new();
        kwargs.insert("id", "12".to_string());
        assert_eq!(pattern.fill_named("edit", &kwargs).unwrap(), "/items/12/edit");
    }

    #[test]
    fn positional_arity_is_checked() {
        let pattern = RoutePattern::parse("/intpath/{int}").unwrap();
        let err = pattern.fill_positional("int_path", &[]).unwrap_err();
        assert!(err.to_string().contains("expected 1 argument"));
    }

    #[test]
    fn match_captures_params() {
        let pattern = RoutePattern::parse("/intpath/{int}").unwrap();
        let params = pattern.match_path("/intpath/42").unwrap();
        assert_eq!(params.get("int").map(String::as_str), Some("42"));
        assert!(pattern.match_path("/intpath/42/extra").is_none());
        assert!(pattern.match_path("/other/42").is_none());
    }

    #[test]
    fn trailing_slash_is_significant() {
        let pattern = RoutePattern::parse("/view1/").unwrap();
        assert!(pattern.match_path("/view1/").is_some());
        assert!(pattern.match_path("/view1").is_none());
        assert_eq!(pattern.fill_positional("view1", &[]).unwrap(), "/view1/");
    }

    #[test]
    fn root_pattern_matches_root() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/x").is_none());
        assert_eq!(pattern.fill_positional("home", &[]).unwrap(), "/");
    }

    #[test]
    fn values_are_percent_encoded() {
        let pattern = RoutePattern::parse("/modal/{slug}").unwrap();
        assert_eq!(
            pattern.fill_positional("modal", &["a b/c"]).unwrap(),
            "/modal/a%20b%2Fc"
        );
    }

    #[test]
    fn bad_patterns_are_rejected() {
        assert!(RoutePattern::parse("view1").is_err());
        assert!(RoutePattern::parse("/x/{").is_err());
        assert!(RoutePattern::parse("/x/{}").is_err());
        assert!(RoutePattern::parse("/x/{a-b}").is_err());
    }
}
