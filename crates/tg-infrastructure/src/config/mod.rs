//! Configuration
//!
//! Layered loading (defaults, TOML file, `TG_` environment) with validation.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, AuthConfig, LoggingConfig, RemoteConfig, ServerConfig, StorageConfig};
