//! # Talent Guard Domain
//!
//! Core types for client-side session resolution and route guarding.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Storage keys, cookie attributes, default routes |
//! | [`cookies`] | Cookie value encoding shared by both guard sides |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`ports`] | Credential store and remote API contracts |
//! | [`value_objects`] | Session, location, route class, auth blobs |

pub mod constants;
pub mod cookies;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CredentialStore, RemoteApi, SharedCredentialStore};
pub use value_objects::{
    ApiCredentials, AuthState, AuthStorageEnvelope, CredentialSource, EntityData, GuardDecision,
    Location, PartialCredentials, RouteClass, Session, SessionSummary,
};
