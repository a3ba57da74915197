//! Cache key builders.
//!
//! All keys are namespaced so that invalidation stays targeted.

use uuid::Uuid;

/// Key for an owner's active item list.
pub fn owner_items(owner_id: Uuid) -> String {
    format!("items:owner:{owner_id}")
}
