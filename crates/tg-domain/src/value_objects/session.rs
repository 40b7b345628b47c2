//! Session value object
//!
//! A `Session` is a read-only projection of stored credentials, computed
//! fresh on every resolution and never persisted. Its constructors are the
//! only way to obtain an authenticated session, and each one requires a
//! complete credential bundle.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::api::ApiCredentials;
use crate::constants::BUSINESS_MARKER;

/// Which credential bundle produced a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// No usable bundle; the session is unauthenticated
    #[default]
    None,
    /// API key, API secret and entity id from the individual keys
    Primary,
    /// Token and entity id from the `auth-storage` envelope
    Fallback,
    /// Token read from request-scoped cookies at the edge
    RequestScoped,
}

impl CredentialSource {
    /// Stable lowercase name, used in logs and summaries
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::RequestScoped => "request_scoped",
        }
    }
}

/// Credential fields found during a resolution that did not authenticate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCredentials {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub entity_id: Option<String>,
}

/// Normalized view of the current credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
    entity_id: Option<String>,
    roles: BTreeSet<String>,
    user_type: Option<String>,
    source: CredentialSource,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Session {
    /// Authenticated session from the primary bundle
    ///
    /// Returns `None` if the key, secret or entity id is empty.
    pub fn primary(
        api_key: String,
        api_secret: String,
        entity_id: String,
        token: Option<String>,
    ) -> Option<Self> {
        if api_key.is_empty() || api_secret.is_empty() || entity_id.is_empty() {
            return None;
        }
        Some(Self {
            token: non_empty(token),
            api_key: Some(api_key),
            api_secret: Some(api_secret),
            entity_id: Some(entity_id),
            source: CredentialSource::Primary,
            ..Self::default()
        })
    }

    /// Authenticated session from the `auth-storage` envelope
    ///
    /// Returns `None` if the token or entity id is empty.
    pub fn fallback(
        token: String,
        entity_id: String,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        if token.is_empty() || entity_id.is_empty() {
            return None;
        }
        Some(Self {
            token: Some(token),
            api_key: non_empty(api_key),
            api_secret: non_empty(api_secret),
            entity_id: Some(entity_id),
            source: CredentialSource::Fallback,
            ..Self::default()
        })
    }

    /// Authenticated session seen by the edge from request cookies
    ///
    /// Returns `None` if the token is empty.
    pub fn request_scoped(token: String, entity_id: Option<String>) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: Some(token),
            entity_id: non_empty(entity_id),
            source: CredentialSource::RequestScoped,
            ..Self::default()
        })
    }

    /// Unauthenticated session keeping whatever was found
    pub fn unauthenticated(partial: PartialCredentials) -> Self {
        Self {
            token: non_empty(partial.token),
            api_key: non_empty(partial.api_key),
            api_secret: non_empty(partial.api_secret),
            entity_id: non_empty(partial.entity_id),
            ..Self::default()
        }
    }

    /// Attach role names, skipping blanks
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(
            roles
                .into_iter()
                .map(|r| Into::<String>::into(r).trim().to_string())
                .filter(|r| !r.is_empty()),
        );
        self
    }

    /// Attach the account user type
    #[must_use]
    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = non_empty(user_type);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.source != CredentialSource::None
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    /// Key and secret for remote API calls, when both are known
    pub fn api_credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(ApiCredentials::new(key.clone(), secret.clone())),
            _ => None,
        }
    }

    /// Credential mirrored into the `auth_token` cookie
    ///
    /// The stored token when there is one, otherwise the `key:secret`
    /// pair the backend accepts as a token. `None` for unauthenticated
    /// sessions.
    pub fn edge_token(&self) -> Option<String> {
        if !self.is_authenticated() {
            return None;
        }
        self.token
            .clone()
            .or_else(|| self.api_credentials().map(|c| c.token()))
    }

    /// Whether any role or the user type flags a business account
    pub fn is_business(&self) -> bool {
        let flagged = |value: &str| value.to_lowercase().contains(BUSINESS_MARKER);
        self.roles.iter().any(|r| flagged(r.as_str()))
            || self.user_type.as_deref().is_some_and(flagged)
    }

    /// Secret-free summary for logs and inspection endpoints
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            authenticated: self.is_authenticated(),
            source: self.source,
            entity_id: self.entity_id.clone(),
            roles: self.roles.iter().cloned().collect(),
            user_type: self.user_type.clone(),
            has_token: self.token.is_some(),
            has_api_credentials: self.api_credentials().is_some(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("source", &self.source)
            .field("entity_id", &self.entity_id)
            .field("roles", &self.roles)
            .field("user_type", &self.user_type)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Serializable session view without secrets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub authenticated: bool,
    pub source: CredentialSource,
    pub entity_id: Option<String>,
    pub roles: Vec<String>,
    pub user_type: Option<String>,
    pub has_token: bool,
    pub has_api_credentials: bool,
}
