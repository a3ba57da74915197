//! Quota evaluation.

pub mod engine;

pub use engine::{QuotaEngine, quota_rejection};
