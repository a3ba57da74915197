//! Session lifecycle orchestration.

pub mod lifecycle;
pub mod sweeper;

pub use lifecycle::{AdmissionResult, SessionLifecycleManager};
pub use sweeper::StaleSessionSweeper;
