use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an [`Item`].
///
/// Whether ids stay unique within a store depends on the
/// [`crate::DuplicatePolicy`]: `ignore` and `reject` keep them unique,
/// `append` lets duplicates in.
pub type ItemId = i64;

/// A single entry in the store's collection.
///
/// Identity is by `id`. Items are never edited in place: the reducer only
/// appends or removes whole items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
