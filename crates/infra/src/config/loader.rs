//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `GRADEBOOK_API_BASE` is set, the configuration comes from the
//!    environment
//! 2. Otherwise the standard locations are probed for a config file
//! 3. With no file either, defaults apply
//!
//! ## Environment Variables
//! - `GRADEBOOK_API_BASE`: Service base URL (required for env loading)
//! - `GRADEBOOK_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `GRADEBOOK_API_USER_AGENT`: User-Agent header value
//! - `GRADEBOOK_STORAGE_BACKEND`: `file`, `keychain` or `memory`
//! - `GRADEBOOK_STORAGE_PATH`: Credential file path (file backend)
//! - `GRADEBOOK_STORAGE_SERVICE`: Keychain service name (keychain backend)
//! - `GRADEBOOK_DISCARD_SUPERSEDED`: Drop responses from replaced sessions
//!   (true/false)
//! - `GRADEBOOK_LOG_LEVEL`: Default log filter
//! - `GRADEBOOK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}`, `./gradebook.{json,toml}` (current working
//!    directory)
//! 2. `../config.{json,toml}`, `../../config.{json,toml}`
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use gradebook_domain::{
    ApiConfig, Config, GradebookError, LoggingConfig, Result, StorageBackend, StorageConfig,
    SyncConfig,
};

const ENV_API_BASE: &str = "GRADEBOOK_API_BASE";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `GradebookError::Config` if an environment value or the probed
/// file is invalid.
pub fn load() -> Result<Config> {
    if std::env::var_os(ENV_API_BASE).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration found; using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `GRADEBOOK_API_BASE` must be present; every other variable falls back
/// to its default.
///
/// # Errors
/// Returns `GradebookError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let base_url = env_var(ENV_API_BASE)?;
    let timeout_seconds = match optional_env("GRADEBOOK_API_TIMEOUT_SECS") {
        Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
            GradebookError::Config(format!("Invalid request timeout '{raw}': {e}"))
        })?),
        None => defaults.api.timeout_seconds,
    };
    let user_agent = optional_env("GRADEBOOK_API_USER_AGENT").or(defaults.api.user_agent);

    let backend = match optional_env("GRADEBOOK_STORAGE_BACKEND") {
        Some(raw) => raw.parse::<StorageBackend>().map_err(GradebookError::Config)?,
        None => defaults.storage.backend,
    };
    let path = optional_env("GRADEBOOK_STORAGE_PATH").unwrap_or(defaults.storage.path);
    let service_name =
        optional_env("GRADEBOOK_STORAGE_SERVICE").unwrap_or(defaults.storage.service_name);

    let discard_superseded =
        env_bool("GRADEBOOK_DISCARD_SUPERSEDED", defaults.sync.discard_superseded);

    let level = optional_env("GRADEBOOK_LOG_LEVEL").unwrap_or(defaults.logging.level);
    let json = env_bool("GRADEBOOK_LOG_JSON", defaults.logging.json);

    Ok(Config {
        api: ApiConfig { base_url, timeout_seconds, user_agent },
        storage: StorageConfig { backend, path, service_name },
        sync: SyncConfig { discard_superseded },
        logging: LoggingConfig { level, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// supported (detected by file extension).
///
/// # Errors
/// Returns `GradebookError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(GradebookError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            GradebookError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| GradebookError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| GradebookError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| GradebookError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(GradebookError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("gradebook.json"),
        dir.join("gradebook.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        GradebookError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-empty environment variable, trimmed
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
