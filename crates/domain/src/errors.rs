//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Main error type for the gradebook client
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GradebookError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for gradebook operations
pub type Result<T> = std::result::Result<T, GradebookError>;

/// Failure of a single remote call.
///
/// `Transport` covers faults below HTTP (connection refused, DNS, timeout).
/// `Rejected` carries the unparsed response of a non-successful status so the
/// caller can decide what the status means in its own context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: String },

    #[error("{0}")]
    Decode(String),

    /// The id cannot be sent as a single path segment (empty, `.` or `..`).
    #[error("invalid resource id {0:?}")]
    InvalidId(String),
}

impl RequestError {
    /// HTTP status of a rejected response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidId(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Human readable detail: the response body when there is one, the status
    /// otherwise.
    pub fn detail(&self) -> String {
        match self {
            Self::Rejected { status, body } => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("status {status}")
                } else {
                    trimmed.to_string()
                }
            }
            Self::Transport(message) | Self::Decode(message) => message.clone(),
            Self::InvalidId(_) => self.to_string(),
        }
    }

    /// Field errors of a rejected response, exactly as the server wrote them.
    ///
    /// Only a non-empty JSON object counts, such as
    /// `{"name": ["subject with this name already exists."]}`. The returned
    /// text is the trimmed body, so field order and spacing are kept.
    pub fn field_errors(&self) -> Option<&str> {
        let Self::Rejected { body, .. } = self else {
            return None;
        };
        match self.json_body()? {
            Value::Object(map) if !map.is_empty() => Some(body.trim()),
            _ => None,
        }
    }

    /// First entry of `non_field_errors` in a rejected response body.
    pub fn non_field_error(&self) -> Option<String> {
        self.json_body()?
            .get("non_field_errors")?
            .as_array()?
            .first()?
            .as_str()
            .map(str::to_string)
    }

    fn json_body(&self) -> Option<Value> {
        match self {
            Self::Rejected { body, .. } => serde_json::from_str(body).ok(),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidId(_) => None,
        }
    }
}

/// Failure of the persisted credential store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored credential is corrupt: {0}")]
    Corrupt(String),
}

impl From<StorageError> for GradebookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RequestError> for GradebookError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Transport(message) => Self::Network(message),
            RequestError::Rejected { status: 401 | 403, .. } => Self::Auth(err.detail()),
            RequestError::Rejected { .. } => Self::InvalidInput(err.detail()),
            RequestError::Decode(message) => Self::Internal(message),
            RequestError::InvalidId(_) => Self::InvalidInput(err.to_string()),
        }
    }
}
