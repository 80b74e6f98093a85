//! Event data model.
//!
//! An [`Event`] is an immutable description of one requested change. It is
//! caller-supplied data: nothing here is validated on construction, and the
//! reducer tolerates missing payload fields by doing nothing.
//!
//! # Wire format
//!
//! ```json
//! { "kind": "ADD_ITEM", "payload": { "item": { "id": 1, "name": "Product 1" } } }
//! { "kind": "REMOVE_ITEM", "payload": { "itemId": 1 } }
//! ```
//!
//! On input:
//! - `type` is accepted as the legacy spelling of `kind`. Both may appear
//!   when they name the same kind.
//! - `payload` may be omitted or `null`.
//! - For kinds the reducer does not recognise, a payload of any other
//!   shape is dropped rather than refused.

pub mod kind;

pub use kind::EventKind;

use crate::model::item::{Item, ItemId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Optional payload fields. Which ones matter depends on the event kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
}

impl Payload {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item.is_none() && self.item_id.is_none()
    }
}

/// A single typed request to change the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Payload::is_empty")]
    pub payload: Payload,
}

/// Input shape before the kind is settled and the payload interpreted.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(default)]
    kind: Option<EventKind>,
    #[serde(default, rename = "type")]
    legacy_kind: Option<EventKind>,
    #[serde(default)]
    payload: Option<Value>,
}

/// Why input could not be read as an [`Event`].
#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("missing field `kind`")]
    MissingKind,
    #[error("`kind` is {kind} but `type` is {legacy}")]
    ConflictingKind { kind: EventKind, legacy: EventKind },
    #[error("invalid payload for {kind}: {source}")]
    Payload {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

impl TryFrom<RawEvent> for Event {
    type Error = EventParseError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.legacy_kind) {
            (Some(kind), Some(legacy)) if kind != legacy => {
                return Err(EventParseError::ConflictingKind { kind, legacy });
            }
            (Some(kind), _) | (None, Some(kind)) => kind,
            (None, None) => return Err(EventParseError::MissingKind),
        };

        let payload = match raw.payload {
            None => Payload::default(),
            Some(value) if kind.is_known() => serde_json::from_value::<Payload>(value)
                .map_err(|source| EventParseError::Payload {
                    kind: kind.clone(),
                    source,
                })?,
            Some(value) => serde_json::from_value::<Payload>(value).unwrap_or_default(),
        };

        Ok(Self::new(kind, payload))
    }
}

impl Event {
    #[must_use]
    pub const fn new(kind: EventKind, payload: Payload) -> Self {
        Self { kind, payload }
    }

    /// `ADD_ITEM` carrying `item`.
    #[must_use]
    pub const fn add_item(item: Item) -> Self {
        Self::new(
            EventKind::AddItem,
            Payload {
                item: Some(item),
                item_id: None,
            },
        )
    }

    /// `REMOVE_ITEM` targeting `id`.
    #[must_use]
    pub const fn remove_item(id: ItemId) -> Self {
        Self::new(
            EventKind::RemoveItem,
            Payload {
                item: None,
                item_id: Some(id),
            },
        )
    }

    /// An event of kind `kind` with an empty payload.
    #[must_use]
    pub fn bare(kind: &str) -> Self {
        Self::new(EventKind::from(kind), Payload::default())
    }

    /// The id a removal applies to.
    ///
    /// `itemId` wins; older producers sent the whole item instead, in which
    /// case its id is used.
    #[must_use]
    pub fn target_id(&self) -> Option<ItemId> {
        self.payload
            .item_id
            .or_else(|| self.payload.item.as_ref().map(|item| item.id))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
