//! # Talent Guard
//!
//! Session resolution and route guarding for the talent marketplace
//! dashboard. This crate is the public facade over the layers and hosts
//! the `tg` command line.
//!
//! ## Example
//!
//! ```
//! use tg::application::classify;
//! use tg::RouteClass;
//!
//! assert_eq!(classify("/portfolio/certs"), RouteClass::Protected);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Session, route and credential types; store and API ports
//! - `application` - Session resolver, route table, edge and client guards
//! - `infrastructure` - Configuration, logging, credential stores, API client
//! - `server` - Rocket edge server

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tg_domain::*;
}

/// Application layer - resolver and guards
pub mod application {
    pub use tg_application::*;
}

/// Infrastructure layer - config, logging and adapters
pub mod infrastructure {
    pub use tg_infrastructure::*;
}

/// Server layer - edge server
pub mod server {
    pub use tg_server::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export main entry point at the crate root
pub use server::run_server;
