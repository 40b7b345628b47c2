//! Credential store adapters
//!
//! | Adapter | Backing | TTL |
//! |---------|---------|-----|
//! | [`InMemoryCredentialStore`] | `DashMap` | optional, per entry |
//! | [`FileCredentialStore`] | one JSON file | ignored |

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
