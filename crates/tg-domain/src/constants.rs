//! Domain layer constants
//!
//! Storage keys and route conventions shared by the resolver, both guards
//! and the login lifecycle. Infrastructure-specific constants live in
//! `tg_infrastructure::constants`.

// ============================================================================
// STORAGE KEYS
// ============================================================================

/// Raw bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Backend API key
pub const AUTH_API_KEY_KEY: &str = "auth_api_key";

/// Backend API secret
pub const AUTH_API_SECRET_KEY: &str = "auth_api_secret";

/// Serialized entity profile (`details.entity_id` or `entity_id`)
pub const ENTITY_DATA_KEY: &str = "entity_data";

/// Consolidated auth envelope `{ state, version }`
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// UI preferences, never touched by logout
pub const UI_PREFERENCES_KEY: &str = "ui-preferences";

/// Verification flow state, never touched by logout
pub const VERIFICATION_STATE_KEY: &str = "verification-storage";

/// Every key written by the login flow and removed on logout
pub const AUTH_KEYS: [&str; 5] = [
    AUTH_TOKEN_KEY,
    AUTH_API_KEY_KEY,
    AUTH_API_SECRET_KEY,
    ENTITY_DATA_KEY,
    AUTH_STORAGE_KEY,
];

/// Keys mirrored from durable storage into cookies for the edge guard
pub const MIRRORED_COOKIE_KEYS: [&str; 2] = [AUTH_TOKEN_KEY, AUTH_STORAGE_KEY];

/// Version written into new `auth-storage` envelopes
pub const AUTH_STORAGE_VERSION: u32 = 0;

// ============================================================================
// COOKIE ATTRIBUTES
// ============================================================================

/// Default lifetime of mirrored cookies (24 hours)
pub const COOKIE_MAX_AGE_SECS: u64 = 86_400;

/// Path attribute of mirrored cookies
pub const COOKIE_PATH: &str = "/";

// ============================================================================
// ROUTES
// ============================================================================

/// Login page
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Query parameter carrying the post-login return path
pub const REDIRECT_PARAM: &str = "redirect";

/// Landing route for business accounts
pub const BUSINESS_LANDING_ROUTE: &str = "/business-dashboard";

/// Landing route for individual accounts
pub const INDIVIDUAL_LANDING_ROUTE: &str = "/individual-dashboard";

/// Marker that flags a role or user type as business
pub const BUSINESS_MARKER: &str = "business";

/// Time the client guard waits for storage hydration after a path change
pub const GRACE_DELAY_MS: u64 = 100;

// ============================================================================
// REMOTE API
// ============================================================================

/// Authorization scheme expected by the backend (`token <key>:<secret>`)
pub const AUTHORIZATION_SCHEME: &str = "token";

/// Envelope status meaning the call succeeded
pub const API_STATUS_SUCCESS: &str = "success";
