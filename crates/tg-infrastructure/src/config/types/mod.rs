//! Configuration types module

pub mod app;
pub mod auth;
pub mod logging;
pub mod remote;
pub mod server;
pub mod storage;

pub use app::AppConfig;
pub use auth::AuthConfig;
pub use logging::LoggingConfig;
pub use remote::RemoteConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
