//! Edge Guard
//!
//! Runs before page code on every navigation. It only has the request's
//! cookies, so protected routes are checked with the request-scoped
//! resolution.

use tg_domain::{CredentialStore, GuardDecision, Location, RouteClass};
use tracing::debug;

use super::landing::GuardRoutes;
use crate::route_classifier::{ROUTE_TABLE, RouteTable};
use crate::session_resolver::SessionResolver;

/// Request-interception guard
#[derive(Debug, Clone)]
pub struct EdgeGuard {
    table: RouteTable,
    routes: GuardRoutes,
    resolver: SessionResolver,
}

impl Default for EdgeGuard {
    fn default() -> Self {
        Self::new(GuardRoutes::default())
    }
}

impl EdgeGuard {
    pub fn new(routes: GuardRoutes) -> Self {
        Self {
            table: ROUTE_TABLE,
            routes,
            resolver: SessionResolver::new(),
        }
    }

    pub fn routes(&self) -> &GuardRoutes {
        &self.routes
    }

    /// Decide a navigation from the request cookies
    pub fn evaluate<S: CredentialStore + ?Sized>(
        &self,
        location: &Location,
        cookies: &S,
    ) -> GuardDecision {
        let path = location.path();
        if self.table.is_static_asset(path) {
            return GuardDecision::Allow;
        }

        match self.table.classify(path) {
            RouteClass::Public | RouteClass::Unclassified => GuardDecision::Allow,
            RouteClass::Protected => {
                let session = self.resolver.resolve_request_scoped(cookies);
                if session.is_authenticated() {
                    GuardDecision::Allow
                } else {
                    debug!(path = %path, "edge guard: protected route without session");
                    GuardDecision::RedirectToLogin {
                        location: self.routes.login_redirect(path),
                    }
                }
            }
        }
    }
}
