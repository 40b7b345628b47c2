//! Guard and cookie configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tg_application::{ClientGuardConfig, GuardRoutes};
use tg_domain::constants::{
    BUSINESS_LANDING_ROUTE, COOKIE_MAX_AGE_SECS, GRACE_DELAY_MS, INDIVIDUAL_LANDING_ROUTE,
    LOGIN_ROUTE,
};

/// Route guard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Login page; must be a public route
    pub login_route: String,
    /// Landing route for business accounts
    pub business_landing_route: String,
    /// Landing route for individual accounts
    pub individual_landing_route: String,
    /// Client guard hydration delay
    pub grace_delay_ms: u64,
    /// `Max-Age` of the mirrored cookies
    pub cookie_max_age_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_route: LOGIN_ROUTE.to_string(),
            business_landing_route: BUSINESS_LANDING_ROUTE.to_string(),
            individual_landing_route: INDIVIDUAL_LANDING_ROUTE.to_string(),
            grace_delay_ms: GRACE_DELAY_MS,
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }
}

impl AuthConfig {
    pub fn guard_routes(&self) -> GuardRoutes {
        GuardRoutes {
            login: self.login_route.clone(),
            business_landing: self.business_landing_route.clone(),
            individual_landing: self.individual_landing_route.clone(),
        }
    }

    pub fn cookie_max_age(&self) -> Duration {
        Duration::from_secs(self.cookie_max_age_secs)
    }

    pub fn client_guard_config(&self) -> ClientGuardConfig {
        ClientGuardConfig {
            routes: self.guard_routes(),
            grace_delay: Duration::from_millis(self.grace_delay_ms),
            cookie_ttl: self.cookie_max_age(),
        }
    }
}
