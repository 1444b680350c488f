//! Session ownership: the live credential, its persisted copy and the
//! generation counter used to correlate responses with the session that
//! issued them.

pub mod ports;

use std::sync::Arc;

use gradebook_domain::constants::STORAGE_TOKEN_KEY;
use gradebook_domain::{Credential, SessionState, StorageError};
use parking_lot::RwLock;
use tracing::{info, warn};

use self::ports::CredentialStore;

/// Credential and generation read together under one lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub credential: Option<Credential>,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct SessionInner {
    state: SessionState,
    generation: u64,
}

/// Owns the current credential.
///
/// Storage faults never escape: they are logged and the in-memory session
/// carries on.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    inner: RwLock<SessionInner>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store, inner: RwLock::new(SessionInner::default()) }
    }

    /// Load the persisted credential, if any, and adopt it.
    ///
    /// Read failures count as "no credential". Unreadable or blank entries
    /// are also removed from storage.
    pub fn restore(&self) -> Option<Credential> {
        let credential = match self.store.get(STORAGE_TOKEN_KEY) {
            Ok(Some(raw)) => match Credential::parse(raw) {
                Some(credential) => Some(credential),
                None => {
                    warn!("Stored credential is empty; removing it");
                    self.discard_stored();
                    None
                }
            },
            Ok(None) => None,
            Err(StorageError::Corrupt(reason)) => {
                warn!(reason = %reason, "Stored credential is unreadable; removing it");
                self.discard_stored();
                None
            }
            Err(err) => {
                warn!(error = %err, "Could not read stored credential");
                None
            }
        };

        if let Some(credential) = &credential {
            self.transition(SessionState::Authenticated { credential: credential.clone() });
            info!("Session restored from storage");
        }

        credential
    }

    /// Adopt a freshly issued credential, replacing any current one.
    pub fn establish(&self, credential: Credential) {
        if let Err(err) = self.store.set(STORAGE_TOKEN_KEY, credential.expose()) {
            warn!(error = %err, "Failed to persist credential; session kept in memory only");
        }
        let generation = self.transition(SessionState::Authenticated { credential });
        info!(generation, "Session established");
    }

    /// Drop the credential from memory and storage.
    pub fn clear(&self) {
        self.discard_stored();
        let generation = self.transition(SessionState::Unauthenticated);
        info!(generation, "Session cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().state.is_authenticated()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.inner.read().state.credential().cloned()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read();
        SessionSnapshot {
            credential: inner.state.credential().cloned(),
            generation: inner.generation,
        }
    }

    fn transition(&self, state: SessionState) -> u64 {
        let mut inner = self.inner.write();
        inner.state = state;
        inner.generation += 1;
        inner.generation
    }

    fn discard_stored(&self) {
        if let Err(err) = self.store.remove(STORAGE_TOKEN_KEY) {
            warn!(error = %err, "Failed to remove stored credential");
        }
    }
}
