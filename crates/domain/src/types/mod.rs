//! Domain types and models

pub mod auth;
pub mod notification;
pub mod resource;
pub mod session;
pub mod student;
pub mod subject;

pub use auth::{LoginRequest, TokenResponse};
pub use notification::{Notification, Severity};
pub use resource::{Resource, ResourceId, ResourceKind};
pub use session::{Credential, SessionState};
pub use student::{NewStudent, Student};
pub use subject::{NewSubject, Subject};
