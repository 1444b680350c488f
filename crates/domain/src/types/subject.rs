//! Subject resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceId, ResourceKind};

/// A course students can enrol in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Grade of the requesting student, present only for student accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_grade: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            updated_at: None,
            student_grade: None,
        }
    }
}

impl Resource for Subject {
    type Draft = NewSubject;

    const KIND: ResourceKind = ResourceKind::Subjects;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Create payload for `POST /api/subjects/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: String,
}

impl NewSubject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
