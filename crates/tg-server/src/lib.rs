//! # Edge Server
//!
//! Rocket application that enforces the route guard before any page is
//! served, using only the request's cookies.
//!
//! ```rust,no_run
//! use tg_infrastructure::AppConfig;
//!
//! #[rocket::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tg_server::run_server(&AppConfig::default()).await?;
//!     Ok(())
//! }
//! ```

// Allow Rust 2024 compatibility lints raised inside Rocket's route macros
#![allow(rust_2024_compatibility)]

pub mod constants;
pub mod cookies;
pub mod edge;
pub mod init;
pub mod routes;
pub mod state;

pub use cookies::CookieCredentialStore;
pub use edge::EdgeGuardFairing;
pub use init::{build_rocket, run_server};
