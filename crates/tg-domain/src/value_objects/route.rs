//! Route value objects
//!
//! Navigation targets, their classification, and guard decisions.

use serde::{Deserialize, Serialize};

/// Classification of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Always reachable
    Public,
    /// Requires an authenticated session
    Protected,
    /// Neither list matched; allowed without an auth check
    Unclassified,
}

impl RouteClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for RouteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the requested route
    Allow,
    /// Send the user to the login route
    RedirectToLogin {
        /// Login route including the `redirect` parameter
        location: String,
    },
    /// Send an authenticated user away from the login route
    RedirectToLanding {
        /// Return path or role-based landing route
        location: String,
    },
}

impl GuardDecision {
    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { location } | Self::RedirectToLanding { location } => {
                Some(location)
            }
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A navigation target split into normalized path and decoded query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse `path?query#fragment`; the fragment is dropped
    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };
        Self {
            path: normalize_path(path),
            query: query.map(parse_query).unwrap_or_default(),
        }
    }

    /// Normalized path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Normalize a path: leading `/`, no repeated or trailing slashes, no query
///
/// ```
/// use tg_domain::value_objects::route::normalize_path;
///
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("portfolio//certs/"), "/portfolio/certs");
/// assert_eq!(normalize_path("/settings?tab=team"), "/settings");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Whether a redirect target stays on this origin
///
/// Accepts absolute paths only; protocol-relative (`//host`) and
/// backslash-smuggled targets are rejected. Control characters are
/// rejected outright: browsers drop tab and newline while parsing, so
/// `/\t/host` would become `//host`.
pub fn is_local_path(target: &str) -> bool {
    !target.chars().any(char::is_control)
        && target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or(spaced)
}
