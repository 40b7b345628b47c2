//! Route Guards
//!
//! Two enforcement points classify against the same [`ROUTE_TABLE`]:
//!
//! - [`EdgeGuard`] runs before any page code and sees only cookies.
//! - [`ClientGuard`] runs after mount with durable storage, mirrors the
//!   credentials into cookies for the next edge check, and handles the
//!   post-login landing redirect.
//!
//! [`ROUTE_TABLE`]: crate::route_classifier::ROUTE_TABLE

mod client;
mod edge;
mod landing;

pub use client::{ClientGuard, ClientGuardConfig, GuardState};
pub use edge::EdgeGuard;
pub use landing::GuardRoutes;
