//! Tracing setup and command logging helpers

use std::time::Duration;

use gradebook_domain::{GradebookError, LoggingConfig, Result};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Output goes to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            GradebookError::Config(format!("Invalid log level '{}': {}", config.level, e))
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|e| {
        GradebookError::Internal(format!("Failed to install tracing subscriber: {}", e))
    })
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` must be a stable identifier without user data.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Stable label for a `GradebookError`, for logs.
#[inline]
pub fn error_label(error: &GradebookError) -> &'static str {
    match error {
        GradebookError::Network(_) => "network",
        GradebookError::Auth(_) => "auth",
        GradebookError::Config(_) => "config",
        GradebookError::Storage(_) => "storage",
        GradebookError::InvalidInput(_) => "invalid_input",
        GradebookError::Internal(_) => "internal",
    }
}
