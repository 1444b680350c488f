//! # Gradebook Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP transport and the REST resource and token clients
//! - Credential stores (JSON file, platform keychain, memory)
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `gradebook-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{RestResourceClient, StudentClient, SubjectClient, TokenAuthClient};
pub use errors::InfraError;
pub use http::{RawResponse, RequestBody, Transport, TransportBuilder};
pub use storage::{
    build_credential_store, FileCredentialStore, InMemoryCredentialStore,
    KeychainCredentialStore,
};
