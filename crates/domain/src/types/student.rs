//! Student resource

use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceId, ResourceKind};

/// A user account enrolled as a student.
///
/// The service exposes students through its user endpoint, so staff and
/// admin accounts come back in the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: ResourceId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_admin: bool,
}

impl Student {
    pub fn new(id: impl Into<ResourceId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            is_staff: false,
            is_admin: false,
        }
    }

    /// "First Last", falling back to the email when no name is set
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

impl Resource for Student {
    type Draft = NewStudent;

    const KIND: ResourceKind = ResourceKind::Students;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn is_visible(&self) -> bool {
        !self.is_staff && !self.is_admin
    }
}

/// Create payload for `POST /api/users/`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl NewStudent {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), first_name: None, last_name: None }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}

impl std::fmt::Debug for NewStudent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewStudent")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}
