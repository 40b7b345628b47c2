//! Session Resolver
//!
//! Produces a [`Session`] from a credential store with a fixed two-tier
//! fallback. Every caller goes through here, so the fallback order is the
//! same no matter which feature asks.
//!
//! 1. Primary: `auth_api_key` + `auth_api_secret` + entity id from
//!    `entity_data` (`details.entity_id`, else `entity_id`).
//! 2. Fallback: `auth-storage` with a `state.token`, taking `apiKey`,
//!    `apiSecret` and `entityId` from `state`; the entity id falls back to
//!    the one found in step 1.
//! 3. Otherwise unauthenticated, carrying the partial fields found.
//!
//! Resolution is read-only and never fails: unreadable blobs count as
//! absent.

use tg_domain::constants::{
    AUTH_API_KEY_KEY, AUTH_API_SECRET_KEY, AUTH_STORAGE_KEY, AUTH_TOKEN_KEY, ENTITY_DATA_KEY,
};
use tg_domain::{AuthStorageEnvelope, CredentialStore, EntityData, PartialCredentials, Session};
use tracing::{debug, trace};

/// Stateless resolver over any [`CredentialStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionResolver;

impl SessionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the session from durable storage
    pub fn resolve<S: CredentialStore + ?Sized>(&self, store: &S) -> Session {
        let token = store.get(AUTH_TOKEN_KEY);
        let api_key = store.get(AUTH_API_KEY_KEY);
        let api_secret = store.get(AUTH_API_SECRET_KEY);
        let entity_raw = store.get(ENTITY_DATA_KEY);
        let entity = EntityData::parse(entity_raw.as_deref());
        let entity_id = entity.entity_id();
        if entity_raw.is_some() && entity_id.is_none() {
            debug!("entity_data present but carries no readable entity id");
        }

        let envelope_raw = store.get(AUTH_STORAGE_KEY);
        let envelope = AuthStorageEnvelope::parse(envelope_raw.as_deref());
        if envelope_raw.is_some() && envelope.is_none() {
            debug!("auth-storage present but unreadable; treating as absent");
        }

        let roles = profile_roles(&entity, envelope.as_ref());
        let user_type = profile_user_type(&entity, envelope.as_ref());

        if let (Some(key), Some(secret), Some(id)) = (&api_key, &api_secret, &entity_id)
            && let Some(session) =
                Session::primary(key.clone(), secret.clone(), id.clone(), token.clone())
        {
            trace!(entity_id = %id, "session resolved via primary credentials");
            return session.with_roles(roles).with_user_type(user_type);
        }

        if let Some(env) = &envelope
            && let Some(env_token) = env.token()
            && let Some(id) = env
                .state
                .entity_id
                .clone()
                .filter(|id| !id.is_empty())
                .or_else(|| entity_id.clone())
            && let Some(session) = Session::fallback(
                env_token.to_string(),
                id,
                env.state.api_key.clone(),
                env.state.api_secret.clone(),
            )
        {
            trace!(entity_id = ?session.entity_id(), "session resolved via auth-storage");
            return session.with_roles(roles).with_user_type(user_type);
        }

        let state = envelope.map(|env| env.state).unwrap_or_default();
        trace!("no complete credential bundle; session unauthenticated");
        Session::unauthenticated(PartialCredentials {
            token: token.or(state.token),
            api_key: api_key.or(state.api_key),
            api_secret: api_secret.or(state.api_secret),
            entity_id: entity_id.or(state.entity_id),
        })
        .with_roles(roles)
        .with_user_type(user_type)
    }

    /// Resolve the session the edge can see from request cookies
    ///
    /// Cookies carry only `auth_token` and `auth-storage`, so the session
    /// is authenticated iff a non-empty token is found in either.
    pub fn resolve_request_scoped<S: CredentialStore + ?Sized>(&self, cookies: &S) -> Session {
        let envelope = AuthStorageEnvelope::parse(cookies.get(AUTH_STORAGE_KEY).as_deref());
        let token = cookies
            .get(AUTH_TOKEN_KEY)
            .or_else(|| envelope.as_ref().and_then(|e| e.token().map(str::to_string)));
        let entity_id = envelope.as_ref().and_then(|e| e.state.entity_id.clone());
        let roles = envelope.as_ref().map(|e| e.state.roles()).unwrap_or_default();
        let user_type = envelope.as_ref().and_then(|e| e.state.user_type());

        match token
            .clone()
            .and_then(|t| Session::request_scoped(t, entity_id.clone()))
        {
            Some(session) => session.with_roles(roles).with_user_type(user_type),
            None => Session::unauthenticated(PartialCredentials {
                token,
                entity_id,
                ..PartialCredentials::default()
            }),
        }
    }
}

fn profile_roles(entity: &EntityData, envelope: Option<&AuthStorageEnvelope>) -> Vec<String> {
    let mut roles = entity.roles();
    if let Some(env) = envelope {
        roles.extend(env.state.roles());
    }
    roles
}

fn profile_user_type(entity: &EntityData, envelope: Option<&AuthStorageEnvelope>) -> Option<String> {
    envelope
        .and_then(|env| env.state.user_type())
        .or_else(|| entity.entity_type())
}
