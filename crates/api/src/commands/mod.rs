//! Commands - user intents mapped onto the sync controller
//!
//! Every command drains the notifications it produced and hands them back
//! with its value, so the caller renders both.

mod session;
mod students;
mod subjects;

use std::future::Future;
use std::time::Instant;

use gradebook_domain::Notification;
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

pub use session::*;
pub use students::*;
pub use subjects::*;

/// Result of a command plus the notifications raised while it ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput<T> {
    pub value: T,
    pub notifications: Vec<Notification>,
}

impl<T> CommandOutput<T> {
    pub fn has_errors(&self) -> bool {
        self.notifications.iter().any(Notification::is_error)
    }
}

/// Run `action`, then drain notifications and log the outcome.
async fn execute<T, F>(ctx: &AppContext, command: &'static str, action: F) -> CommandOutput<T>
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let value = action.await;
    let output = CommandOutput { value, notifications: ctx.notifications.drain() };
    log_command_execution(command, start.elapsed(), !output.has_errors());
    output
}
