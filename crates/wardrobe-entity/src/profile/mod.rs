//! Owner profile entity.

pub mod model;
pub mod tier;

pub use model::Profile;
pub use tier::Tier;
