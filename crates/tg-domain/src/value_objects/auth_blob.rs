//! Persisted credential blobs
//!
//! Two representations are written at login: the serialized entity profile
//! under `entity_data`, and the consolidated `auth-storage` envelope.
//! Both parse leniently: malformed JSON reads as an empty blob, and a field
//! of the wrong type reads as absent without discarding its neighbours.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::constants::AUTH_STORAGE_VERSION;

/// Serialized entity/user profile
///
/// Wraps the raw JSON so lookups tolerate any shape the backend sends.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityData(Value);

impl Default for EntityData {
    fn default() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }
}

impl EntityData {
    /// Parse a stored blob; absent or malformed input yields an empty object
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|r| serde_json::from_str::<Value>(r).ok())
            .filter(Value::is_object)
            .map(Self)
            .unwrap_or_default()
    }

    /// Wrap an already-parsed profile; non-objects become an empty object
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            Self(value)
        } else {
            Self::default()
        }
    }

    /// `details.entity_id`, else top-level `entity_id`
    pub fn entity_id(&self) -> Option<String> {
        str_at(&self.0, &["details", "entity_id"]).or_else(|| str_at(&self.0, &["entity_id"]))
    }

    /// Roles listed under `roles` or `details.roles`
    pub fn roles(&self) -> Vec<String> {
        let mut roles = role_names(self.0.get("roles"));
        roles.extend(role_names(
            self.0.get("details").and_then(|d| d.get("roles")),
        ));
        roles
    }

    /// `details.entity_type`, else top-level `entity_type`
    pub fn entity_type(&self) -> Option<String> {
        str_at(&self.0, &["details", "entity_type"]).or_else(|| str_at(&self.0, &["entity_type"]))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// `state` section of the `auth-storage` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub entity_id: Option<String>,
    pub is_authenticated: bool,
    pub user: Option<Value>,
}

impl AuthState {
    /// Read each field on its own; mistyped fields are absent
    pub fn from_value(state: &Value) -> Self {
        Self {
            token: str_at(state, &["token"]),
            api_key: str_at(state, &["apiKey"]),
            api_secret: str_at(state, &["apiSecret"]),
            entity_id: str_at(state, &["entityId"]),
            is_authenticated: state
                .get("isAuthenticated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            user: state.get("user").filter(|u| u.is_object()).cloned(),
        }
    }

    /// Roles listed under `user.roles`
    pub fn roles(&self) -> Vec<String> {
        role_names(self.user.as_ref().and_then(|u| u.get("roles")))
    }

    /// `user.user_type`, else `user.userType`
    pub fn user_type(&self) -> Option<String> {
        let user = self.user.as_ref()?;
        str_at(user, &["user_type"]).or_else(|| str_at(user, &["userType"]))
    }
}

/// Consolidated `auth-storage` envelope `{ state, version }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthStorageEnvelope {
    pub state: AuthState,
    pub version: u32,
}

impl Default for AuthStorageEnvelope {
    fn default() -> Self {
        Self {
            state: AuthState::default(),
            version: AUTH_STORAGE_VERSION,
        }
    }
}

impl<'de> Deserialize<'de> for AuthStorageEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom("auth-storage envelope must be a JSON object"))
    }
}

impl AuthStorageEnvelope {
    /// Wrap a state in a current-version envelope
    pub fn new(state: AuthState) -> Self {
        Self {
            state,
            version: AUTH_STORAGE_VERSION,
        }
    }

    /// Parse a stored envelope; `None` on absent input, invalid JSON or a
    /// non-object
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        Self::from_value(&serde_json::from_str(raw?).ok()?)
    }

    /// Read an envelope from parsed JSON; `None` unless `value` is an object
    ///
    /// A missing or non-object `state` reads as empty; a missing or
    /// mistyped `version` reads as the current version.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let state = value
            .get("state")
            .filter(|s| s.is_object())
            .map(AuthState::from_value)
            .unwrap_or_default();
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(AUTH_STORAGE_VERSION);
        Some(Self { state, version })
    }

    /// Serialize for storage
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Non-empty `state.token`
    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Non-empty string found by walking `path` through nested objects
fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Role names from an array of strings or of `{ "role": ... }` objects
fn role_names(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => item.get("role").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .filter(|r| !r.trim().is_empty())
        .collect()
}
