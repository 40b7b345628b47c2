//! Session lifecycle
//!
//! Login completion writes both stored representations (the individual
//! keys and the consolidated `auth-storage` envelope); logout deletes
//! every auth key and leaves UI preferences and verification state alone.

use serde_json::Value;
use tg_domain::constants::{
    AUTH_API_KEY_KEY, AUTH_API_SECRET_KEY, AUTH_KEYS, AUTH_STORAGE_KEY, AUTH_TOKEN_KEY,
    ENTITY_DATA_KEY,
};
use tg_domain::{AuthState, AuthStorageEnvelope, CredentialStore, EntityData, Error, Result};
use tracing::debug;

/// Credentials returned by a successful login
#[derive(Clone, Default)]
pub struct LoginCredentials {
    /// Bearer token, when the backend issues one
    pub token: Option<String>,
    pub api_key: String,
    pub api_secret: String,
    /// Entity profile; must carry `details.entity_id` or `entity_id`
    pub entity_data: Value,
    /// User profile stored in the envelope (roles, user type)
    pub user: Option<Value>,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("entity_data", &self.entity_data)
            .field("user", &self.user)
            .finish()
    }
}

/// Write login credentials to durable storage
///
/// Rejects credentials that could never authenticate: an empty key or
/// secret, or entity data without an entity id.
pub fn persist_login<S: CredentialStore + ?Sized>(
    store: &S,
    credentials: &LoginCredentials,
) -> Result<()> {
    if credentials.api_key.is_empty() || credentials.api_secret.is_empty() {
        return Err(Error::invalid_argument("API key and secret are required"));
    }
    let entity_id = EntityData::from_value(credentials.entity_data.clone())
        .entity_id()
        .ok_or_else(|| Error::invalid_argument("entity data carries no entity id"))?;

    let token = credentials.token.clone().filter(|t| !t.is_empty());
    let envelope = AuthStorageEnvelope::new(AuthState {
        token: token.clone(),
        api_key: Some(credentials.api_key.clone()),
        api_secret: Some(credentials.api_secret.clone()),
        entity_id: Some(entity_id.clone()),
        is_authenticated: true,
        user: credentials.user.clone(),
    });
    let envelope_json = envelope.to_json()?;
    let entity_json = serde_json::to_string(&credentials.entity_data)?;

    match &token {
        Some(t) => store.set(AUTH_TOKEN_KEY, t, None),
        None => store.clear(AUTH_TOKEN_KEY),
    }
    store.set(AUTH_API_KEY_KEY, &credentials.api_key, None);
    store.set(AUTH_API_SECRET_KEY, &credentials.api_secret, None);
    store.set(ENTITY_DATA_KEY, &entity_json, None);
    store.set(AUTH_STORAGE_KEY, &envelope_json, None);

    debug!(entity_id = %entity_id, "login credentials persisted");
    Ok(())
}

/// Delete every auth key; idempotent
pub fn clear_session<S: CredentialStore + ?Sized>(store: &S) {
    for key in AUTH_KEYS {
        store.clear(key);
    }
}
