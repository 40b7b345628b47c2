//! Domain Port Interfaces
//!
//! Boundary contracts implemented by outer layers:
//!
//! - **credential_store** - key/value access to durable and request-scoped storage
//! - **remote_api** - the backend REST API consumed by feature modules

/// Credential persistence port
pub mod credential_store;
/// Remote backend API port
pub mod remote_api;

pub use credential_store::{CredentialStore, SharedCredentialStore};
pub use remote_api::{FileUpload, RemoteApi};
