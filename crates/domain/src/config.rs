//! Configuration structures
//!
//! Loaded by `gradebook_infra::config` from environment variables or a
//! TOML/JSON file. Every section has defaults so a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE, DEFAULT_CREDENTIAL_FILE, DEFAULT_KEYCHAIN_SERVICE};
use crate::impl_domain_enum_conversions;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE.to_string(), timeout_seconds: None, user_agent: None }
    }
}

/// Where the credential is persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Secret
    /// Service)
    Keychain,
    /// JSON key-value file
    #[default]
    File,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl_domain_enum_conversions!(StorageBackend {
    Keychain => "keychain",
    File => "file",
    Memory => "memory",
});

/// Credential storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
    pub service_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: DEFAULT_CREDENTIAL_FILE.to_string(),
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

/// Synchronization behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Drop responses issued under a session that has since been replaced.
    pub discard_superseded: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { discard_superseded: true }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
