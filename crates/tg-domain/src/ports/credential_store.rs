//! Credential Store Port
//!
//! Defines the contract for the key/value storage that holds credentials.
//! Durable storage (browser local storage, a file) and request-scoped
//! storage (cookies) both implement it.

use std::sync::Arc;
use std::time::Duration;

/// Key/value access to stored credentials
///
/// Implementations never fail outward: a missing key, an expired entry or
/// an undecodable value all read as `None`, and a failed write is logged
/// and dropped.
pub trait CredentialStore {
    /// Read a value; `None` when missing, expired, empty or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    ///
    /// Cookie-backed stores apply `ttl`, defaulting to one day. Durable
    /// stores ignore it.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>);

    /// Delete a value; clearing a missing key is a no-op
    fn clear(&self, key: &str);
}

/// Shared credential store handle
pub type SharedCredentialStore = Arc<dyn CredentialStore + Send + Sync>;

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) {
        (**self).set(key, value, ttl);
    }

    fn clear(&self, key: &str) {
        (**self).clear(key);
    }
}
