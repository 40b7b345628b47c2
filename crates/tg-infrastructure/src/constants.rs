//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Storage keys and route conventions are defined in `tg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tg";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TG";

/// Separator for nested keys in environment variables (`TG_SERVER__PORT`)
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default bind address
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default directory of built front-end assets
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Largest request body the API proxy relays (32 MiB)
pub const DEFAULT_MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "TG_LOG";

/// File stem used when the log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "tg";

// ============================================================================
// STORAGE CONSTANTS
// ============================================================================

/// Default durable store file name, under the data directory
pub const DEFAULT_STORE_FILENAME: &str = "storage.json";

/// Default key namespace of the durable store
pub const DEFAULT_STORE_NAMESPACE: &str = "";

/// Separator between namespace and key
pub const STORE_NAMESPACE_SEPARATOR: &str = ":";

// ============================================================================
// REMOTE API CONSTANTS
// ============================================================================

/// Default backend origin
pub const DEFAULT_REMOTE_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Content type sent with JSON bodies and requested in responses
pub const JSON_CONTENT_TYPE: &str = "application/json";
