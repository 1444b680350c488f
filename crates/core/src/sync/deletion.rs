//! Staged deletion awaiting confirmation

use gradebook_domain::ResourceId;

/// At most one id awaiting confirmation. Staging again replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionFlow {
    staged: Option<ResourceId>,
}

impl DeletionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, id: ResourceId) {
        self.staged = Some(id);
    }

    pub fn cancel(&mut self) {
        self.staged = None;
    }

    pub fn staged(&self) -> Option<&ResourceId> {
        self.staged.as_ref()
    }
}
