//! Subject commands

use gradebook_domain::{NewSubject, ResourceId, Subject};

use super::{execute, CommandOutput};
use crate::context::AppContext;

/// Current subject collection, newest first. Makes no request.
pub fn list_subjects(ctx: &AppContext) -> Vec<Subject> {
    ctx.controller.subjects().items()
}

pub async fn add_subject(ctx: &AppContext, name: &str) -> CommandOutput<Option<Subject>> {
    execute(ctx, "subjects::add", ctx.controller.subjects().create(NewSubject::new(name))).await
}

/// First phase of a deletion; the subject stays until confirmed.
pub fn stage_subject_deletion(ctx: &AppContext, id: impl Into<ResourceId>) {
    ctx.controller.subjects().stage_delete(id);
}

pub fn cancel_subject_deletion(ctx: &AppContext) {
    ctx.controller.subjects().cancel_delete();
}

/// Delete the staged subject. The value reports whether the service
/// confirmed it.
pub async fn confirm_subject_deletion(ctx: &AppContext) -> CommandOutput<bool> {
    execute(ctx, "subjects::delete", ctx.controller.subjects().confirm_delete()).await
}
