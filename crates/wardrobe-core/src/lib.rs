//! # wardrobe-core
//!
//! Core error handling, configuration schemas, quota types, and shared
//! traits for the Wardrobe session & quota service.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;
