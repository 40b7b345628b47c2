//! Backend REST client
//!
//! Implements the [`RemoteApi`] port over `reqwest`. Every call carries
//! `Authorization: token <key>:<secret>` and `Accept: application/json`;
//! JSON bodies add `Content-Type: application/json`, while multipart
//! uploads leave the content type to the multipart encoder so the
//! boundary is set.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tg_domain::error::{Error, Result};
use tg_domain::value_objects::api::ApiEnvelope;
use tg_domain::ports::FileUpload;
use tg_domain::{ApiCredentials, RemoteApi};
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::constants::JSON_CONTENT_TYPE;
use crate::error_ext::ErrorContext;

/// Methods the API proxy passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    Get,
    Post,
}

/// Raw request relayed by the edge proxy
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: ProxyMethod,
    /// Path below the origin, without leading slash
    pub path: String,
    /// Raw query string, without `?`
    pub query: Option<String>,
    /// `Authorization` header of the incoming request
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Upstream answer relayed back unchanged
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Client for the backend at one configured origin
#[derive(Debug, Clone)]
pub struct FrappeClient {
    base_url: String,
    http_client: Client,
}

impl FrappeClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .network_context("Failed to build HTTP client")?;
        Ok(Self::with_client(config.base_url.clone(), http_client))
    }

    /// Use an existing `reqwest` client
    pub fn with_client<S: Into<String>>(base_url: S, http_client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a backend method path
    pub fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder, credentials: &ApiCredentials) -> RequestBuilder {
        request
            .header(AUTHORIZATION, credentials.authorization_header())
            .header(ACCEPT, JSON_CONTENT_TYPE)
    }

    async fn send(&self, request: RequestBuilder, method: &str) -> Result<Value> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", method))?;
        Self::read_envelope(response, method).await
    }

    async fn read_envelope(response: Response, method: &str) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(method = method, status = status.as_u16(), "remote API call failed");
            return Err(Error::network(format!(
                "{} returned HTTP {}: {}",
                method,
                status.as_u16(),
                body
            )));
        }

        let body: Value = response
            .json()
            .await
            .network_context(format!("Invalid JSON from {}", method))?;
        let data = ApiEnvelope::into_data(body);
        if let Err(e) = &data {
            debug!(method = method, error = %e, "remote API reported failure");
        }
        data
    }

    /// Relay a request to the backend without interpreting the envelope
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse> {
        let mut url = self.url(&request.path);
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut builder = match request.method {
            ProxyMethod::Get => self.http_client.get(&url),
            ProxyMethod::Post => self.http_client.post(&url).body(request.body),
        }
        .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(auth) = &request.authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Proxy request to {} failed", request.path))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .network_context("Failed to read proxied response")?
            .to_vec();

        debug!(path = %request.path, status = status, "proxied request");
        Ok(ForwardResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl RemoteApi for FrappeClient {
    async fn get(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        query: &[(String, String)],
    ) -> Result<Value> {
        let request = self.authorized(self.http_client.get(self.url(method)), credentials);
        self.send(request.query(query), method).await
    }

    async fn post_json(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        body: &Value,
    ) -> Result<Value> {
        let payload = serde_json::to_vec(body)?;
        let request = self
            .authorized(self.http_client.post(self.url(method)), credentials)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload);
        self.send(request, method).await
    }

    async fn upload(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        upload: FileUpload,
    ) -> Result<Value> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(mime) = &upload.mime_type {
            part = part
                .mime_str(mime)
                .with_context(|| format!("Invalid MIME type {}", mime))?;
        }
        let form = upload
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(upload.field_name, part);

        let request = self
            .authorized(self.http_client.post(self.url(method)), credentials)
            .multipart(form);
        self.send(request, method).await
    }
}
