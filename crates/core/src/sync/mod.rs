//! Resource synchronization: per-kind collections, the deletion flow and
//! the controller orchestrating both kinds.

mod controller;
mod deletion;
mod messages;
mod resource;
mod ticket;

pub mod notifications;
pub mod ports;
pub mod validation;

pub use controller::SyncController;
pub use deletion::DeletionFlow;
pub use resource::ResourceSync;
pub use ticket::{Operation, RequestTicket};
