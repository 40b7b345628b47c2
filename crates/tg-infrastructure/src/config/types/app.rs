//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{AuthConfig, LoggingConfig, RemoteConfig, ServerConfig, StorageConfig};

/// Root configuration
///
/// Every section falls back to its defaults, so a TOML file only needs
/// the keys it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Edge server
    pub server: ServerConfig,
    /// Logging
    pub logging: LoggingConfig,
    /// Guard routes and cookie lifetime
    pub auth: AuthConfig,
    /// Durable credential store
    pub storage: StorageConfig,
    /// Backend API
    pub remote: RemoteConfig,
}
