//! Clothing item entity.

pub mod model;

pub use model::{ClothingItem, CreateClothingItem};
