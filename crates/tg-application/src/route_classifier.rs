//! Route Classifier
//!
//! One constant table classifies paths for both the edge guard and the
//! client guard. Prefixes match whole segments: `/portfolio` matches
//! `/portfolio` and `/portfolio/certs`, never `/portfolios`.

use tg_domain::RouteClass;
use tg_domain::value_objects::route::normalize_path;

/// Public, protected and static-asset path lists
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    /// Paths that are public only on exact match
    pub public_exact: &'static [&'static str],
    /// Public path prefixes
    pub public_prefixes: &'static [&'static str],
    /// Protected path prefixes
    pub protected_prefixes: &'static [&'static str],
    /// Framework and asset prefixes the edge guard never inspects
    pub asset_prefixes: &'static [&'static str],
}

/// The route table of the dashboard
pub const ROUTE_TABLE: RouteTable = RouteTable {
    public_exact: &["/"],
    public_prefixes: &[
        "/auth/login",
        "/auth/register",
        "/auth/forgot-password",
        "/api",
    ],
    protected_prefixes: &[
        "/dashboard",
        "/business-dashboard",
        "/individual-dashboard",
        "/portfolio",
        "/settings",
        "/job-postings",
        "/team-management",
    ],
    asset_prefixes: &[
        "/_next",
        "/static",
        "/assets",
        "/favicon.ico",
        "/robots.txt",
    ],
};

// A path matching both lists would make the tie-break decide access.
const _: () = assert!(
    !ROUTE_TABLE.has_overlap(),
    "public and protected route prefixes overlap"
);

impl RouteTable {
    /// Classify a path; public is checked before protected
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = normalize_path(path);
        if self.is_public(&path) {
            RouteClass::Public
        } else if matches_any(self.protected_prefixes, &path) {
            RouteClass::Protected
        } else {
            RouteClass::Unclassified
        }
    }

    /// Whether the edge guard should skip a path entirely
    pub fn is_static_asset(&self, path: &str) -> bool {
        matches_any(self.asset_prefixes, &normalize_path(path))
    }

    fn is_public(&self, path: &str) -> bool {
        self.public_exact.contains(&path) || matches_any(self.public_prefixes, path)
    }

    /// Whether any protected prefix could also match a public entry
    pub const fn has_overlap(&self) -> bool {
        let mut i = 0;
        while i < self.protected_prefixes.len() {
            let protected = self.protected_prefixes[i];
            let mut j = 0;
            while j < self.public_prefixes.len() {
                let public = self.public_prefixes[j];
                if is_segment_prefix(public, protected) || is_segment_prefix(protected, public) {
                    return true;
                }
                j += 1;
            }
            let mut k = 0;
            while k < self.public_exact.len() {
                if is_segment_prefix(protected, self.public_exact[k]) {
                    return true;
                }
                k += 1;
            }
            i += 1;
        }
        false
    }
}

/// Classify a path against [`ROUTE_TABLE`]
///
/// ```
/// use tg_application::classify;
/// use tg_domain::RouteClass;
///
/// assert_eq!(classify("/"), RouteClass::Public);
/// assert_eq!(classify("/business-dashboard/x"), RouteClass::Protected);
/// assert_eq!(classify("/opportunities"), RouteClass::Unclassified);
/// ```
pub fn classify(path: &str) -> RouteClass {
    ROUTE_TABLE.classify(path)
}

fn matches_any(prefixes: &[&str], path: &str) -> bool {
    prefixes.iter().any(|prefix| is_segment_prefix(prefix, path))
}

/// `path` equals `prefix` or continues it with a new segment
pub const fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    let p = prefix.as_bytes();
    let s = path.as_bytes();
    if p.len() > s.len() {
        return false;
    }
    let mut i = 0;
    while i < p.len() {
        if p[i] != s[i] {
            return false;
        }
        i += 1;
    }
    s.len() == p.len() || s[p.len()] == b'/' || (!p.is_empty() && p[p.len() - 1] == b'/')
}
