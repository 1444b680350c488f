//! Platform keychain store (macOS Keychain, Windows Credential Manager,
//! Secret Service)

use gradebook_core::CredentialStore;
use gradebook_domain::StorageError;
use keyring::Entry;
use tracing::debug;

use crate::errors::storage_error_from_keyring;

/// One keychain entry per key under a fixed service name
#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service_name: String,
}

impl KeychainCredentialStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service_name, key).map_err(storage_error_from_keyring)
    }
}

impl CredentialStore for KeychainCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!(service = %self.service_name, key = %key, "Reading credential from keychain");
        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(storage_error_from_keyring(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Storing credential in keychain");
        self.entry(key)?.set_password(value).map_err(storage_error_from_keyring)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Deleting credential from keychain");
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(storage_error_from_keyring(err)),
        }
    }
}
