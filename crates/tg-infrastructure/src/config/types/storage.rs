//! Durable store configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONFIG_DIR, DEFAULT_STORE_FILENAME, DEFAULT_STORE_NAMESPACE};

/// Durable credential store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the store
    pub path: PathBuf,
    /// Prefix applied to every key; empty for none
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let path = dirs::data_dir()
            .map(|d| d.join(DEFAULT_CONFIG_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", DEFAULT_CONFIG_DIR)))
            .join(DEFAULT_STORE_FILENAME);
        Self {
            path,
            namespace: DEFAULT_STORE_NAMESPACE.to_string(),
        }
    }
}
