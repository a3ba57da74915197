//! Clothing item management.

pub mod service;

pub use service::ItemService;
