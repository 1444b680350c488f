//! # Gradebook App
//!
//! Composition root and command layer for the gradebook client.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Commands mirroring user intents, each returning the notifications it
//!   produced
//! - The `gradebook` command-line entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the infrastructure adapters into the core controller

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
