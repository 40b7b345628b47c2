//! Login and landing routes

use tg_domain::constants::{
    BUSINESS_LANDING_ROUTE, INDIVIDUAL_LANDING_ROUTE, LOGIN_ROUTE, REDIRECT_PARAM,
};
use tg_domain::value_objects::route::{is_local_path, normalize_path};
use tg_domain::{Location, Session};

/// Routes the guards redirect to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRoutes {
    pub login: String,
    pub business_landing: String,
    pub individual_landing: String,
}

impl Default for GuardRoutes {
    fn default() -> Self {
        Self {
            login: LOGIN_ROUTE.to_string(),
            business_landing: BUSINESS_LANDING_ROUTE.to_string(),
            individual_landing: INDIVIDUAL_LANDING_ROUTE.to_string(),
        }
    }
}

impl GuardRoutes {
    /// Whether `path` is the login route
    pub fn is_login(&self, path: &str) -> bool {
        normalize_path(path) == normalize_path(&self.login)
    }

    /// Login route carrying `path` as the `redirect` parameter
    ///
    /// ```
    /// use tg_application::GuardRoutes;
    ///
    /// let routes = GuardRoutes::default();
    /// assert_eq!(routes.login_redirect("/portfolio"), "/auth/login?redirect=%2Fportfolio");
    /// ```
    pub fn login_redirect(&self, path: &str) -> String {
        format!(
            "{}?{}={}",
            self.login,
            REDIRECT_PARAM,
            urlencoding::encode(path)
        )
    }

    /// Role-based landing route
    pub fn landing_for(&self, session: &Session) -> &str {
        if session.is_business() {
            &self.business_landing
        } else {
            &self.individual_landing
        }
    }

    /// Where an authenticated user on the login route should go
    ///
    /// A local `redirect` parameter wins; anything else (absent, external,
    /// or pointing back at the login route) falls back to the landing route.
    pub fn post_login_target(&self, location: &Location, session: &Session) -> String {
        match location.query_param(REDIRECT_PARAM) {
            Some(target) if is_local_path(target) && !self.is_login(target) => target.to_string(),
            _ => self.landing_for(session).to_string(),
        }
    }
}
