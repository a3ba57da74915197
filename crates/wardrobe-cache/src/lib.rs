//! # wardrobe-cache
//!
//! In-memory cache provider for Wardrobe, backed by moka. The provider
//! implements [`wardrobe_core::traits::CacheProvider`] and is injected into
//! the services that cache; there is no process-global cache state.

pub mod keys;
pub mod store;

pub use store::MemoryCacheProvider;
