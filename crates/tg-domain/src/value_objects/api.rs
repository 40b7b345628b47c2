//! Remote API value objects
//!
//! Credentials sent with every backend call and the response envelope
//! every backend call answers with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{API_STATUS_SUCCESS, AUTHORIZATION_SCHEME};
use crate::error::{Error, Result};

/// Backend API key and secret
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// `<key>:<secret>`
    pub fn token(&self) -> String {
        format!("{}:{}", self.api_key, self.api_secret)
    }

    /// Value of the `Authorization` header
    ///
    /// ```
    /// use tg_domain::ApiCredentials;
    ///
    /// let creds = ApiCredentials::new("key", "secret");
    /// assert_eq!(creds.authorization_header(), "token key:secret");
    /// ```
    pub fn authorization_header(&self) -> String {
        format!("{} {}", AUTHORIZATION_SCHEME, self.token())
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Inner `message` object of the response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeBody {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response envelope `{ message: { status, data?, message? } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub message: EnvelopeBody,
}

impl ApiEnvelope {
    /// Interpret a response body
    ///
    /// Returns `data` (or `null`) on `"success"`, an [`Error::Api`]
    /// otherwise, including bodies that are not an envelope at all.
    pub fn into_data(body: Value) -> Result<Value> {
        let envelope: Self = serde_json::from_value(body)
            .map_err(|e| Error::api("malformed", format!("unexpected response shape: {e}")))?;
        let EnvelopeBody {
            status,
            data,
            message,
        } = envelope.message;
        if status == API_STATUS_SUCCESS {
            Ok(data.unwrap_or(Value::Null))
        } else {
            let status = if status.is_empty() {
                "missing".to_string()
            } else {
                status
            };
            Err(Error::api(
                status,
                message.unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}
