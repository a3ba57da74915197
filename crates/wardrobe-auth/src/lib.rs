//! # wardrobe-auth
//!
//! Bearer token plumbing for Wardrobe. The identity provider is an external
//! collaborator; this crate verifies the HS256 tokens it issues (and can
//! mint them for tests and tooling).

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
