//! Student commands

use gradebook_domain::{NewStudent, ResourceId, Student};

use super::{execute, CommandOutput};
use crate::context::AppContext;

/// Current student collection (staff and admins excluded), newest first.
pub fn list_students(ctx: &AppContext) -> Vec<Student> {
    ctx.controller.students().items()
}

pub async fn add_student(ctx: &AppContext, draft: NewStudent) -> CommandOutput<Option<Student>> {
    execute(ctx, "students::add", ctx.controller.students().create(draft)).await
}

pub fn stage_student_deletion(ctx: &AppContext, id: impl Into<ResourceId>) {
    ctx.controller.students().stage_delete(id);
}

pub fn cancel_student_deletion(ctx: &AppContext) {
    ctx.controller.students().cancel_delete();
}

pub async fn confirm_student_deletion(ctx: &AppContext) -> CommandOutput<bool> {
    execute(ctx, "students::delete", ctx.controller.students().confirm_delete()).await
}
