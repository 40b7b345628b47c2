//! # Infrastructure Layer
//!
//! Technical concerns behind the domain ports and the ambient stack.
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML, `TG_` environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Infrastructure defaults |
//! | [`error_ext`] | Context helpers mapping foreign errors into the domain error |
//!
//! ### Adapters
//! | Module | Description |
//! |--------|-------------|
//! | [`storage`] | In-memory and file-backed credential stores |
//! | [`remote`] | `reqwest` client for the backend API |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod remote;
pub mod storage;

pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
pub use remote::FrappeClient;
pub use storage::{FileCredentialStore, InMemoryCredentialStore};
