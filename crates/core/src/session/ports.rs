//! Port interface for the persisted credential

use gradebook_domain::StorageError;

/// Key-value store holding the persisted credential between runs.
///
/// Calls are synchronous: every backend (file, keychain, memory) answers
/// without suspending.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
