//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Session`] | Normalized projection of stored credentials |
//! | [`EntityData`] | Serialized entity profile |
//! | [`AuthStorageEnvelope`] | Consolidated `auth-storage` blob |
//! | [`Location`] | Navigation target (path + query) |
//! | [`RouteClass`] | Public / Protected / Unclassified |
//! | [`GuardDecision`] | Allow or redirect |
//! | [`ApiCredentials`] | Backend key and secret |

/// Remote API credentials and envelope
pub mod api;
/// Persisted credential blobs
pub mod auth_blob;
/// Navigation and guard types
pub mod route;
/// Session projection
pub mod session;

pub use api::{ApiCredentials, ApiEnvelope, EnvelopeBody};
pub use auth_blob::{AuthState, AuthStorageEnvelope, EntityData};
pub use route::{GuardDecision, Location, RouteClass};
pub use session::{CredentialSource, PartialCredentials, Session, SessionSummary};
