//! Remote API Port
//!
//! Defines the contract for the backend REST API. Every call is
//! authenticated with `Authorization: token <key>:<secret>` and answers
//! with the `{ message: { status, data?, message? } }` envelope; a status
//! other than `"success"` is a failure even on HTTP 200.

use crate::error::Result;
use crate::value_objects::ApiCredentials;
use async_trait::async_trait;

/// A file sent as a multipart upload
#[derive(Debug, Clone, Default)]
pub struct FileUpload {
    /// Multipart field holding the file
    pub field_name: String,
    /// File name reported to the backend
    pub file_name: String,
    /// MIME type, if known
    pub mime_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
    /// Extra text fields sent alongside the file
    pub fields: Vec<(String, String)>,
}

/// Remote backend interface
///
/// `method` is the backend method path relative to the configured origin,
/// e.g. `api/method/portfolio.get_certificates`. Successful calls return
/// the envelope's `data` (JSON `null` when absent).
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// GET with query parameters
    async fn get(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value>;

    /// POST a JSON body
    async fn post_json(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// POST a multipart upload
    async fn upload(
        &self,
        credentials: &ApiCredentials,
        method: &str,
        upload: FileUpload,
    ) -> Result<serde_json::Value>;
}
