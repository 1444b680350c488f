//! # Gradebook Domain
//!
//! Business domain types for the gradebook client.
//!
//! This crate contains:
//! - Resource types (subjects, students) and their identifiers
//! - Session types (credential, session state) and notifications
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other gradebook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
