//! Remote API configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REMOTE_BASE_URL, DEFAULT_REMOTE_TIMEOUT_SECS};

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Single origin every API call goes to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
