//! The event reducer: `(state, event) -> state'`.
//!
//! | Kind | Effect | When the payload does not apply |
//! |---|---|---|
//! | `ADD_ITEM` | append `payload.item` at the end | no item: no-op |
//! | `REMOVE_ITEM` | remove the first item with the target id | no id or no match: no-op |
//! | anything else | none | - |
//!
//! Reduction never fails. A missing effect is expressed by returning a state
//! equal to the input.

use crate::event::{Event, EventKind};
use crate::model::store::{DataStore, DuplicatePolicy};
use crate::produce::produce;
use tracing::trace;

/// Reduce with the default [`DuplicatePolicy::Append`].
#[must_use]
pub fn reduce(state: &DataStore, event: &Event) -> DataStore {
    reduce_with(state, event, DuplicatePolicy::default())
}

/// Reduce `event` onto `state` under `policy`. `state` is never modified.
///
/// Under [`DuplicatePolicy::Ignore`] and [`DuplicatePolicy::Reject`] an
/// `ADD_ITEM` whose id is already present leaves the state unchanged;
/// callers that want rejection surfaced use
/// [`crate::validate::validate`] first.
#[must_use]
pub fn reduce_with(state: &DataStore, event: &Event, policy: DuplicatePolicy) -> DataStore {
    match &event.kind {
        EventKind::AddItem => {
            let Some(item) = &event.payload.item else {
                trace!(kind = %event.kind, "no item in payload, ignoring");
                return state.clone();
            };
            if !policy.allows_duplicates() && state.contains(item.id) {
                trace!(id = item.id, %policy, "duplicate id, ignoring");
                return state.clone();
            }
            produce(state, |draft| draft.items.push(item.clone()))
        }
        EventKind::RemoveItem => {
            let Some(index) = event.target_id().and_then(|id| state.position(id)) else {
                trace!(kind = %event.kind, "no matching item, ignoring");
                return state.clone();
            };
            produce(state, |draft| {
                draft.items.remove(index);
            })
        }
        EventKind::Other(raw) => {
            trace!(kind = %raw, "unrecognised event kind, ignoring");
            state.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Payload;
    use crate::model::item::Item;

    fn store(items: &[(i64, &str)]) -> DataStore {
        DataStore::from_items(items.iter().map(|(id, n)| Item::new(*id, *n)).collect())
    }

    #[test]
    fn add_appends_at_end() {
        let before = store(&[(1, "a")]);
        let after = reduce(&before, &Event::add_item(Item::new(2, "b")));
        assert_eq!(after, store(&[(1, "a"), (2, "b")]));
        assert_eq!(before, store(&[(1, "a")]));
    }

    #[test]
    fn add_without_item_is_noop() {
        let before = store(&[(1, "a")]);
        let event = Event::new(EventKind::AddItem, Payload::default());
        assert_eq!(reduce(&before, &event), before);
    }

    #[test]
    fn add_duplicate_appends_by_default() {
        let before = store(&[(1, "a")]);
        let after = reduce(&before, &Event::add_item(Item::new(1, "a2")));
        assert_eq!(after, store(&[(1, "a"), (1, "a2")]));
    }

    #[test]
    fn add_duplicate_ignored_under_strict_policies() {
        let before = store(&[(1, "a")]);
        let event = Event::add_item(Item::new(1, "a2"));
        assert_eq!(reduce_with(&before, &event, DuplicatePolicy::Ignore), before);
        assert_eq!(reduce_with(&before, &event, DuplicatePolicy::Reject), before);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let before = store(&[(1, "a"), (2, "b"), (3, "c")]);
        let after = reduce(&before, &Event::remove_item(2));
        assert_eq!(after, store(&[(1, "a"), (3, "c")]));
    }

    #[test]
    fn remove_takes_only_first_match() {
        let before = store(&[(1, "a"), (2, "b"), (1, "a2")]);
        let after = reduce(&before, &Event::remove_item(1));
        assert_eq!(after, store(&[(2, "b"), (1, "a2")]));
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let before = store(&[(1, "a")]);
        assert_eq!(reduce(&before, &Event::remove_item(42)), before);
    }

    #[test]
    fn remove_accepts_item_payload() {
        let before = store(&[(1, "Product 1")]);
        let event = Event::new(
            EventKind::RemoveItem,
            Payload {
                item: Some(Item::new(1, "Product 1")),
                item_id: None,
            },
        );
        assert!(reduce(&before, &event).is_empty());
    }

    #[test]
    fn remove_without_target_is_noop() {
        let before = store(&[(1, "a")]);
        assert_eq!(reduce(&before, &Event::bare("REMOVE_ITEM")), before);
    }

    #[test]
    fn unknown_kind_is_noop() {
        let before = store(&[(1, "a"), (2, "b")]);
        let mut event = Event::bare("CLEAR_ALL");
        event.payload.item_id = Some(1);
        assert_eq!(reduce(&before, &event), before);
    }

    #[test]
    fn add_then_remove_round_trips() {
        let before = store(&[(1, "a"), (2, "b")]);
        let added = reduce(&before, &Event::add_item(Item::new(3, "c")));
        assert_eq!(reduce(&added, &Event::remove_item(3)), before);
    }
}
