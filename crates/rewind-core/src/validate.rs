//! Optional strict validation of events against a state.
//!
//! The reducer itself is total and absorbs every malformed event as a no-op.
//! Deployments that would rather hear about such events run [`validate`]
//! first (or use [`crate::HistoryStore::try_dispatch`], which does).

use crate::error::ErrorCode;
use crate::event::{Event, EventKind};
use crate::model::item::ItemId;
use crate::model::store::{DataStore, DuplicatePolicy};

/// Why an event was refused by strict validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A recognised kind whose payload lacks the field it needs.
    #[error("malformed {kind} event: {reason}")]
    MalformedEvent {
        kind: EventKind,
        reason: &'static str,
    },
    /// A kind the reducer has no rule for.
    #[error("unknown event kind '{0}'")]
    UnknownKind(String),
    /// A removal targeting an id that is not in the store.
    #[error("no item with id {0}")]
    UnknownItem(ItemId),
    /// An addition whose id is already present, under [`DuplicatePolicy::Reject`].
    #[error("an item with id {0} already exists")]
    DuplicateId(ItemId),
}

impl ValidationError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedEvent { .. } => ErrorCode::MalformedEvent,
            Self::UnknownKind(_) => ErrorCode::UnknownKind,
            Self::UnknownItem(_) => ErrorCode::UnknownItem,
            Self::DuplicateId(_) => ErrorCode::DuplicateId,
        }
    }
}

/// Check that `event` would have an effect on `state` under `policy`.
///
/// Duplicate ids are only an error under [`DuplicatePolicy::Reject`]; under
/// `Ignore` they pass validation and reduce to a no-op, under `Append` they
/// are appended.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(
    state: &DataStore,
    event: &Event,
    policy: DuplicatePolicy,
) -> Result<(), ValidationError> {
    match &event.kind {
        EventKind::AddItem => {
            let item = event
                .payload
                .item
                .as_ref()
                .ok_or_else(|| ValidationError::MalformedEvent {
                    kind: EventKind::AddItem,
                    reason: "payload.item is missing",
                })?;
            if policy == DuplicatePolicy::Reject && state.contains(item.id) {
                return Err(ValidationError::DuplicateId(item.id));
            }
            Ok(())
        }
        EventKind::RemoveItem => {
            let id = event
                .target_id()
                .ok_or_else(|| ValidationError::MalformedEvent {
                    kind: EventKind::RemoveItem,
                    reason: "payload.itemId is missing",
                })?;
            if state.contains(id) {
                Ok(())
            } else {
                Err(ValidationError::UnknownItem(id))
            }
        }
        EventKind::Other(raw) => Err(ValidationError::UnknownKind(raw.clone())),
    }
}
