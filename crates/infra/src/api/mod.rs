//! REST clients for the gradebook service
//!
//! Typed adapters over [`Transport`](crate::http::Transport) implementing
//! the core `ResourceClient` and `Authenticator` ports.

pub mod auth;
pub mod client;

pub use auth::TokenAuthClient;
pub use client::{RestResourceClient, StudentClient, SubjectClient};
