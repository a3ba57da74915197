//! # wardrobe-service
//!
//! Business logic for the Wardrobe session & quota service: the quota
//! engine, the session lifecycle manager, the item service, and the stale
//! session sweeper.

pub mod context;
pub mod item;
pub mod quota;
pub mod session;

pub use context::RequestContext;
pub use item::ItemService;
pub use quota::QuotaEngine;
pub use session::{AdmissionResult, SessionLifecycleManager, StaleSessionSweeper};
