//! Per-kind notification wording

use gradebook_domain::ResourceKind;

pub(crate) struct KindMessages {
    pub created: &'static str,
    pub deleted: &'static str,
    pub create_failed: &'static str,
    pub collection: &'static str,
}

pub(crate) const fn messages_for(kind: ResourceKind) -> KindMessages {
    match kind {
        ResourceKind::Subjects => KindMessages {
            created: "Subject added",
            deleted: "Subject deleted",
            create_failed: "Add failed",
            collection: "subjects",
        },
        ResourceKind::Students => KindMessages {
            created: "Student created",
            deleted: "Student deleted",
            create_failed: "Create failed",
            collection: "students",
        },
    }
}
