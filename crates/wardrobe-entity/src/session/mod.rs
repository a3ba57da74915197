//! Session entity.

pub mod model;

pub use model::{CreateSession, Session, SessionStatus};
