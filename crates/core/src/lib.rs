//! # Gradebook Core
//!
//! Session and resource-synchronization logic, with no HTTP or storage code.
//!
//! This crate contains:
//! - Port interfaces (traits) for credential storage, resource clients,
//!   token exchange and notification delivery
//! - The session manager and the per-kind resource synchronizer
//! - The sync controller that ties sign-in, sign-out and refreshes together
//!
//! ## Architecture Principles
//! - Only depends on `gradebook-domain`
//! - All external collaborators are injected as `Arc<dyn Port>`
//! - Remote failures end at this layer as notifications

pub mod session;
pub mod sync;

pub use session::ports::CredentialStore;
pub use session::{SessionManager, SessionSnapshot};
pub use sync::notifications::NotificationQueue;
pub use sync::ports::{Authenticator, NotificationSink, ResourceClient};
pub use sync::validation::{DraftValidation, ValidationError};
pub use sync::{DeletionFlow, Operation, RequestTicket, ResourceSync, SyncController};
