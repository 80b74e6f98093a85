//! Value types held by the store: items and the item collection.

pub mod item;
pub mod store;
