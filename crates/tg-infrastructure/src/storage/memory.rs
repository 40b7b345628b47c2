//! In-memory credential store
//!
//! Concurrent map with optional per-entry expiry. Without a default TTL it
//! stands in for durable storage; with one it behaves like a cookie jar.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tg_domain::CredentialStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Map-backed [`CredentialStore`]
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: DashMap<String, Entry>,
    default_ttl: Option<Duration>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `ttl` to writes that do not carry their own
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: Some(ttl),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live `(key, value)` pairs, sorted by key
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let now = Instant::now();
        let mut pairs: Vec<_> = self
            .entries
            .iter()
            .filter(|e| !e.is_expired(now))
            .map(|e| (e.key().clone(), e.value().value.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Drop expired entries
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;
        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone()).filter(|v| !v.is_empty())
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let expires_at = ttl
            .or(self.default_ttl)
            .and_then(|ttl| Instant::now().checked_add(ttl));
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    fn clear(&self, key: &str) {
        self.entries.remove(key);
    }
}
