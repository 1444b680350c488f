//! Application constants
//!
//! Centralized location for the wire-level and validation constants shared
//! by the client layers.

// Remote service
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const TOKEN_AUTH_PATH: &str = "/api-token-auth/";
/// Authorization scheme expected by the service (`Authorization: Token <t>`).
pub const AUTH_SCHEME: &str = "Token";

// Persisted credential
pub const STORAGE_TOKEN_KEY: &str = "apiToken";
pub const DEFAULT_CREDENTIAL_FILE: &str = "gradebook-credentials.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "gradebook.api";

// Validation
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Notification messages shared across resource kinds
pub const MSG_UNAUTHORIZED: &str = "Unauthorized: please sign in";
pub const MSG_VALIDATION_FALLBACK: &str = "Validation error";
pub const MSG_NETWORK_ERROR: &str = "Network error: could not reach the server";
pub const MSG_SIGNED_IN: &str = "Signed in";
pub const MSG_SIGNED_OUT: &str = "Signed out";
pub const MSG_LOGIN_INPUT_REQUIRED: &str = "Please enter username and password.";
pub const MSG_LOGIN_FAILED: &str = "Login failed (check credentials)";
pub const MSG_LOGIN_MISSING_TOKEN: &str = "Login response missing token";
