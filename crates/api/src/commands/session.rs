//! Session commands

use super::{execute, CommandOutput};
use crate::context::AppContext;

/// Restore the stored session and load both collections.
pub async fn start(ctx: &AppContext) -> CommandOutput<bool> {
    execute(ctx, "session::start", async {
        ctx.controller.start().await;
        ctx.session.is_authenticated()
    })
    .await
}

/// Exchange username and password for a token. The value reports whether a
/// session was established.
pub async fn sign_in(ctx: &AppContext, username: &str, password: &str) -> CommandOutput<bool> {
    execute(ctx, "session::sign_in", ctx.controller.sign_in(username, password)).await
}

pub async fn sign_out(ctx: &AppContext) -> CommandOutput<()> {
    execute(ctx, "session::sign_out", ctx.controller.sign_out()).await
}

/// Reload both collections.
pub async fn refresh(ctx: &AppContext) -> CommandOutput<()> {
    execute(ctx, "session::refresh", ctx.controller.refresh_all()).await
}
