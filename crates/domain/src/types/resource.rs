//! Resource identity and kind

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Server-assigned identifier.
///
/// The service hands out integers but ids also round-trip through text
/// (command lines, URLs), so equality and hashing use the string form:
/// `ResourceId::from(1) == ResourceId::from("1")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// String form used for comparison and path building
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for ResourceId {}

impl Hash for ResourceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The two collections managed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Subjects,
    Students,
}

impl_domain_enum_conversions!(ResourceKind {
    Subjects => "subjects",
    Students => "students",
});

impl ResourceKind {
    /// Collection endpoint, e.g. `/api/subjects/`
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Subjects => "/api/subjects/",
            // Students are plain users on the service side
            Self::Students => "/api/users/",
        }
    }
}

/// A record held in one of the managed collections.
pub trait Resource: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Payload accepted by the create endpoint
    type Draft: Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> &ResourceId;

    /// Whether the record belongs in the local collection. Records outside
    /// this view's authority are accepted by the service but never shown.
    fn is_visible(&self) -> bool {
        true
    }
}
