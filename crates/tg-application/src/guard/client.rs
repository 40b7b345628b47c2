//! Client Guard
//!
//! Runs after mount with access to durable storage. Each path change
//! re-enters `Checking`; decisions that need a session wait one grace
//! delay for storage hydration, and a decision overtaken by a newer path
//! change is dropped instead of applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tg_domain::constants::{
    AUTH_STORAGE_KEY, AUTH_TOKEN_KEY, COOKIE_MAX_AGE_SECS, GRACE_DELAY_MS, MIRRORED_COOKIE_KEYS,
};
use tg_domain::{
    AuthState, AuthStorageEnvelope, GuardDecision, Location, RouteClass, Session,
    SharedCredentialStore,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::landing::GuardRoutes;
use crate::lifecycle::{LoginCredentials, clear_session, persist_login};
use crate::route_classifier::{ROUTE_TABLE, RouteTable};
use crate::session_resolver::SessionResolver;

/// Client guard state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    /// Waiting for the decision on the current path
    Checking,
    /// The current path may render
    Allowed,
    /// Navigating to the login route
    RedirectingToLogin { location: String },
    /// Navigating away from the login route
    RedirectingToLanding { location: String },
}

impl From<GuardDecision> for GuardState {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Allow => Self::Allowed,
            GuardDecision::RedirectToLogin { location } => Self::RedirectingToLogin { location },
            GuardDecision::RedirectToLanding { location } => {
                Self::RedirectingToLanding { location }
            }
        }
    }
}

/// Client guard tuning
#[derive(Debug, Clone)]
pub struct ClientGuardConfig {
    pub routes: GuardRoutes,
    /// Wait before deciding a path that needs a session
    pub grace_delay: Duration,
    /// Lifetime of mirrored cookies
    pub cookie_ttl: Duration,
}

impl Default for ClientGuardConfig {
    fn default() -> Self {
        Self {
            routes: GuardRoutes::default(),
            grace_delay: Duration::from_millis(GRACE_DELAY_MS),
            cookie_ttl: Duration::from_secs(COOKIE_MAX_AGE_SECS),
        }
    }
}

/// In-app guard over durable storage
pub struct ClientGuard {
    durable: SharedCredentialStore,
    cookies: SharedCredentialStore,
    config: ClientGuardConfig,
    table: RouteTable,
    resolver: SessionResolver,
    generation: AtomicU64,
    state: watch::Sender<GuardState>,
}

impl ClientGuard {
    pub fn new(
        durable: SharedCredentialStore,
        cookies: SharedCredentialStore,
        config: ClientGuardConfig,
    ) -> Self {
        let (state, _) = watch::channel(GuardState::Checking);
        Self {
            durable,
            cookies,
            config,
            table: ROUTE_TABLE,
            resolver: SessionResolver::new(),
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    /// Resolve the session from durable storage
    pub fn current_session(&self) -> Session {
        self.resolver.resolve(&*self.durable)
    }

    /// Mirror durable credentials into cookies
    ///
    /// Authenticated: `auth_token` gets the session's edge token and
    /// `auth-storage` gets the durable envelope, or one built from the
    /// session, with `apiSecret` removed. Unauthenticated: both cookies are
    /// cleared.
    pub fn sync_cookies(&self) -> Session {
        let session = self.current_session();
        let Some(token) = session.edge_token() else {
            for key in MIRRORED_COOKIE_KEYS {
                self.cookies.clear(key);
            }
            return session;
        };

        let ttl = Some(self.config.cookie_ttl);
        self.cookies.set(AUTH_TOKEN_KEY, &token, ttl);

        let mut envelope = AuthStorageEnvelope::parse(self.durable.get(AUTH_STORAGE_KEY).as_deref())
            .unwrap_or_else(|| edge_envelope(&session, token));
        envelope.state.api_secret = None;
        match envelope.to_json() {
            Ok(json) => self.cookies.set(AUTH_STORAGE_KEY, &json, ttl),
            Err(e) => {
                warn!(error = %e, "could not serialize auth-storage for cookie");
                self.cookies.clear(AUTH_STORAGE_KEY);
            }
        }
        session
    }

    /// Decide a location for a given session, without waiting
    pub fn decide(&self, location: &Location, session: &Session) -> GuardDecision {
        let path = location.path();
        let routes = &self.config.routes;

        if routes.is_login(path) && session.is_authenticated() {
            return GuardDecision::RedirectToLanding {
                location: routes.post_login_target(location, session),
            };
        }

        match self.table.classify(path) {
            RouteClass::Protected if !session.is_authenticated() => GuardDecision::RedirectToLogin {
                location: routes.login_redirect(path),
            },
            _ => GuardDecision::Allow,
        }
    }

    /// Handle a path change
    ///
    /// Returns the terminal state, or `None` when a newer path change
    /// superseded this one during the grace delay.
    pub async fn on_navigate(&self, target: &str) -> Option<GuardState> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let location = Location::parse(target);
        self.state.send_replace(GuardState::Checking);

        let mut session = self.sync_cookies();
        let needs_session = self.config.routes.is_login(location.path())
            || self.table.classify(location.path()) == RouteClass::Protected;

        if needs_session {
            tokio::time::sleep(self.config.grace_delay).await;
            if self.is_stale(generation) {
                debug!(path = %location.path(), "client guard: superseded by newer navigation");
                return None;
            }
            session = self.sync_cookies();
        }

        let state = GuardState::from(self.decide(&location, &session));
        if self.is_stale(generation) {
            return None;
        }
        debug!(path = %location.path(), state = ?state, "client guard decided");
        self.state.send_replace(state.clone());
        Some(state)
    }

    /// Persist login credentials and mirror them into cookies
    pub fn complete_login(&self, credentials: &LoginCredentials) -> tg_domain::Result<Session> {
        persist_login(&*self.durable, credentials)?;
        let session = self.sync_cookies();
        info!(
            entity_id = ?session.entity_id(),
            source = session.source().as_str(),
            "login completed"
        );
        Ok(session)
    }

    /// Clear stored credentials and the mirrored cookies
    pub fn logout(&self) {
        clear_session(&*self.durable);
        self.sync_cookies();
        info!("logged out");
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}

/// Envelope carried to the edge when durable storage has none
fn edge_envelope(session: &Session, token: String) -> AuthStorageEnvelope {
    AuthStorageEnvelope::new(AuthState {
        token: Some(token),
        api_key: session.api_key().map(str::to_string),
        api_secret: None,
        entity_id: session.entity_id().map(str::to_string),
        is_authenticated: true,
        user: None,
    })
}
