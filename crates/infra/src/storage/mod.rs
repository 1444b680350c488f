//! Credential stores implementing the core `CredentialStore` port

mod file;
mod keychain;
mod memory;

use std::sync::Arc;

use gradebook_core::CredentialStore;
use gradebook_domain::{StorageBackend, StorageConfig};
use tracing::debug;

pub use file::FileCredentialStore;
pub use keychain::KeychainCredentialStore;
pub use memory::InMemoryCredentialStore;

/// Build the store selected by `config.backend`
pub fn build_credential_store(config: &StorageConfig) -> Arc<dyn CredentialStore> {
    debug!(backend = %config.backend, "Creating credential store");
    match config.backend {
        StorageBackend::File => Arc::new(FileCredentialStore::new(&config.path)),
        StorageBackend::Keychain => Arc::new(KeychainCredentialStore::new(&config.service_name)),
        StorageBackend::Memory => Arc::new(InMemoryCredentialStore::new()),
    }
}
