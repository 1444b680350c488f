//! Conversions from external infrastructure errors into domain errors.

use std::io;

use gradebook_domain::{GradebookError, RequestError, StorageError};
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GradebookError);

impl From<InfraError> for GradebookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GradebookError> for InfraError {
    fn from(value: GradebookError) -> Self {
        InfraError(value)
    }
}

trait IntoGradebookError {
    fn into_gradebook(self) -> GradebookError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error */
/* -------------------------------------------------------------------------- */

impl IntoGradebookError for HttpError {
    fn into_gradebook(self) -> GradebookError {
        if self.is_builder() {
            return GradebookError::Config(format!("invalid HTTP client setup: {self}"));
        }
        GradebookError::Network(transport_message(&self))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_gradebook())
    }
}

/// Fault below HTTP, reported separately from any status code
pub fn transport_error(err: &HttpError) -> RequestError {
    RequestError::Transport(transport_message(err))
}

fn transport_message(err: &HttpError) -> String {
    if err.is_timeout() {
        return "HTTP request timed out".into();
    }
    if err.is_connect() {
        return format!("HTTP connection failure: {err}");
    }
    err.to_string()
}

/* -------------------------------------------------------------------------- */
/* keyring::Error */
/* -------------------------------------------------------------------------- */

/// `NoEntry` is not a failure for callers of `get`/`remove`; handle it before
/// converting.
pub fn storage_error_from_keyring(err: KeyringError) -> StorageError {
    use KeyringError::*;

    match err {
        BadEncoding(_) => StorageError::Corrupt("credential in keychain is not valid UTF-8".into()),
        NoStorageAccess(inner) => {
            StorageError::Unavailable(format!("unable to access secure storage: {inner}"))
        }
        PlatformFailure(inner) => {
            StorageError::Unavailable(format!("keychain platform error: {inner}"))
        }
        other => StorageError::Unavailable(other.to_string()),
    }
}

impl IntoGradebookError for KeyringError {
    fn into_gradebook(self) -> GradebookError {
        storage_error_from_keyring(self).into()
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_gradebook())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error */
/* -------------------------------------------------------------------------- */

pub fn storage_error_from_io(err: &io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::InvalidData => StorageError::Corrupt(err.to_string()),
        io::ErrorKind::PermissionDenied => {
            StorageError::Unavailable(format!("permission denied: {err}"))
        }
        _ => StorageError::Unavailable(err.to_string()),
    }
}

impl IntoGradebookError for io::Error {
    fn into_gradebook(self) -> GradebookError {
        storage_error_from_io(&self).into()
    }
}

impl From<io::Error> for InfraError {
    fn from(value: io::Error) -> Self {
        InfraError(value.into_gradebook())
    }
}
