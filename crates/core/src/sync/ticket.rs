//! Correlation of requests with the session that issued them

use gradebook_domain::{impl_domain_enum_conversions, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Delete,
}

impl_domain_enum_conversions!(Operation {
    List => "list",
    Create => "create",
    Delete => "delete",
});

/// Issued when a request starts. A response whose ticket carries an older
/// generation than the live session is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: ResourceKind,
    pub operation: Operation,
    pub generation: u64,
}

impl RequestTicket {
    pub fn new(kind: ResourceKind, operation: Operation, generation: u64) -> Self {
        Self { kind, operation, generation }
    }

    pub fn is_superseded_by(&self, current_generation: u64) -> bool {
        self.generation != current_generation
    }
}
