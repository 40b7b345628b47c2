//! File-backed credential store
//!
//! Durable storage kept as one flat JSON object on disk, the way browser
//! local storage keeps string values per origin. Keys are prefixed with
//! the configured namespace. Every operation re-reads the file so separate
//! processes observe each other's writes; the last write wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tg_domain::error::Result;
use tg_domain::CredentialStore;
use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::constants::STORE_NAMESPACE_SEPARATOR;
use crate::error_ext::ErrorContext;

type Entries = BTreeMap<String, String>;

/// Durable [`CredentialStore`] over a JSON file
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    namespace: String,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            namespace: String::new(),
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path.clone()).with_namespace(config.namespace.clone())
    }

    /// Prefix every key with `namespace:`
    #[must_use]
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scoped(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", self.namespace, STORE_NAMESPACE_SEPARATOR, key)
        }
    }

    fn read_entries(&self) -> Entries {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential store unreadable");
                return Entries::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "credential store corrupt; reading as empty");
            Entries::new()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).io_context("Failed to create store directory")?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).io_context("Failed to write credential store")?;
        std::fs::rename(&tmp, &self.path).io_context("Failed to replace credential store")?;
        Ok(())
    }

    fn update<F: FnOnce(&mut Entries)>(&self, op: &str, key: &str, f: F) {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.read_entries();
        f(&mut entries);
        match self.write_entries(&entries) {
            Ok(()) => debug!(key = key, op = op, "credential store updated"),
            Err(e) => warn!(key = key, op = op, error = %e, "credential store write dropped"),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries()
            .remove(&self.scoped(key))
            .filter(|v| !v.is_empty())
    }

    fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) {
        let scoped = self.scoped(key);
        self.update("set", key, |entries| {
            entries.insert(scoped, value.to_string());
        });
    }

    fn clear(&self, key: &str) {
        let scoped = self.scoped(key);
        let exists = self.read_entries().contains_key(&scoped);
        if exists {
            self.update("clear", key, |entries| {
                entries.remove(&scoped);
            });
        }
    }
}
