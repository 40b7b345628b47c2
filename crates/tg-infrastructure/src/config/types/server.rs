//! Server configuration types

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STATIC_DIR,
};

/// Edge server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Directory of built front-end assets
    pub static_dir: PathBuf,
    /// Body size limit for proxied requests, uploads included
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Parsed bind address, `127.0.0.1` when the host is not an IP
    pub fn address(&self) -> IpAddr {
        self.host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}
