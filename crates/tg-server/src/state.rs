//! Managed server state

use std::path::PathBuf;
use std::time::Duration;

use tg_application::SessionResolver;
use tg_infrastructure::FrappeClient;

/// State shared by the route handlers
pub struct ServerState {
    pub resolver: SessionResolver,
    pub remote: FrappeClient,
    pub static_dir: PathBuf,
    pub cookie_max_age: Duration,
    /// Body size limit of the API proxy
    pub max_body_bytes: u64,
}
