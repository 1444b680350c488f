//! Session credential and state

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::AUTH_SCHEME;

/// Opaque API token issued by the service.
///
/// `Debug` and `Display` never reveal the token; use [`Credential::expose`]
/// where the raw value is needed (request headers, storage).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Parse a stored or issued token. Blank values are rejected.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == raw.len() {
            Some(Self(raw))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header: `Token <credential>`
    pub fn authorization_value(&self) -> String {
        format!("{AUTH_SCHEME} {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Whether the client currently holds a credential
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    Authenticated {
        credential: Credential,
    },
    #[default]
    Unauthenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Authenticated { credential } => Some(credential),
            Self::Unauthenticated => None,
        }
    }
}
