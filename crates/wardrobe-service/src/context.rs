//! Per-request context.

use uuid::Uuid;

/// The authenticated caller's identity, injected by the request boundary.
///
/// Every service operation is scoped to `owner_id`; handlers never accept a
/// client-supplied owner id.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// The authenticated owner.
    pub owner_id: Uuid,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(owner_id: Uuid) -> Self {
        Self { owner_id }
    }
}
