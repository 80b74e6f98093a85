use super::item::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The whole state of the container: an ordered collection of items.
///
/// Insertion order is preserved on add and removal keeps the relative
/// order of the remaining items. A `DataStore` is a plain value; cloning it
/// yields a fully independent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataStore {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl DataStore {
    /// The empty initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub const fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item with `id`, scanning from the start.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ids in collection order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

impl fmt::Display for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DuplicatePolicy
// ---------------------------------------------------------------------------

/// How an `AddItem` event treats an id that is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append the item anyway. Duplicate ids become observable.
    #[default]
    Append,
    /// Treat the event as a no-op.
    Ignore,
    /// Refuse the event. Fallible dispatch reports `DuplicateId`; the
    /// infallible path degrades to a no-op.
    Reject,
}

impl DuplicatePolicy {
    pub const ALL: [Self; 3] = [Self::Append, Self::Ignore, Self::Reject];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Ignore => "ignore",
            Self::Reject => "reject",
        }
    }

    /// Whether an `AddItem` for an existing id may change the collection.
    #[must_use]
    pub const fn allows_duplicates(self) -> bool {
        matches!(self, Self::Append)
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`DuplicatePolicy`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duplicate policy '{got}': expected one of append, ignore, reject")]
pub struct ParsePolicyError {
    pub got: String,
}

impl FromStr for DuplicatePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            _ => Err(ParsePolicyError { got: s.to_string() }),
        }
    }
}
