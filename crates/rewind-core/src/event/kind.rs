//! Event kind discriminant.
//!
//! The wire representation is an upper snake case string. Kinds the reducer
//! does not recognise are carried verbatim in [`EventKind::Other`] so they
//! round-trip unchanged and reduce to a no-op.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Append the payload's item to the collection.
    AddItem,
    /// Remove the first item whose id matches the payload.
    RemoveItem,
    /// Any other kind string. Accepted without error, never applied.
    Other(String),
}

impl EventKind {
    pub const ADD_ITEM: &'static str = "ADD_ITEM";
    pub const REMOVE_ITEM: &'static str = "REMOVE_ITEM";

    /// Return the wire string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AddItem => Self::ADD_ITEM,
            Self::RemoveItem => Self::REMOVE_ITEM,
            Self::Other(raw) => raw,
        }
    }

    /// Whether the reducer has a rule for this kind.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            Self::ADD_ITEM => Self::AddItem,
            Self::REMOVE_ITEM => Self::RemoveItem,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}
