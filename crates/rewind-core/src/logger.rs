//! Action logging: a reporting sink for dispatched events.
//!
//! Observers see `(message, event)` pairs when a caller chooses to report a
//! dispatch. They have no access to the store and never gate a transition.

use crate::event::Event;
use serde::Serialize;
use tracing::info;

/// Anything that wants to hear about dispatched events.
pub trait Observer {
    fn observe(&mut self, message: &str, event: &Event);
}

/// Log `event` at info level as `"<message>: <event json>"`.
pub fn log_action(message: &str, event: &Event) {
    info!(kind = %event.kind, "{message}: {event}");
}

/// Bind `message` once and get back a reusable logging closure.
///
/// ```
/// use rewind_core::{Event, Item, logger::action_logger};
///
/// let log = action_logger("Event Dispatched");
/// log(&Event::add_item(Item::new(1, "Product 1")));
/// ```
pub fn action_logger(message: impl Into<String>) -> impl Fn(&Event) {
    let message = message.into();
    move |event| log_action(&message, event)
}

/// Observer that forwards to [`log_action`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Observer for TracingLogger {
    fn observe(&mut self, message: &str, event: &Event) {
        log_action(message, event);
    }
}

/// One observed `(message, event)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub message: String,
    pub event: Event,
}

/// In-memory observer that keeps every pair it sees, in order.
#[derive(Debug, Default, Clone)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ActionRecord> {
        self.records
    }
}

impl Observer for ActionLog {
    fn observe(&mut self, message: &str, event: &Event) {
        self.records.push(ActionRecord {
            message: message.to_string(),
            event: event.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::model::item::Item;

    #[test]
    fn action_log_records_in_order() {
        let mut log = ActionLog::new();
        let add = Event::add_item(Item::new(1, "Product 1"));
        let remove = Event::remove_item(1);
        log.observe("Event Dispatched", &add);
        log.observe("Event Dispatched", &remove);

        let events: Vec<_> = log.records().iter().map(|r| &r.event).collect();
        assert_eq!(events, vec![&add, &remove]);
        assert!(log.records().iter().all(|r| r.message == "Event Dispatched"));
    }

    #[test]
    fn observing_does_not_touch_state() {
        let mut store = HistoryStore::new();
        let mut log = ActionLog::new();
        let event = Event::add_item(Item::new(1, "Product 1"));

        log.observe("before", &event);
        assert!(store.current().is_empty());
        store.dispatch(&event);
        TracingLogger.observe("after", &event);

        assert_eq!(store.current().len(), 1);
        assert_eq!(log.into_records().len(), 1);
    }

    #[test]
    fn bound_logger_is_reusable() {
        let log = action_logger("Event Dispatched");
        log(&Event::remove_item(1));
        log(&Event::bare("UNKNOWN"));
    }

    #[test]
    fn record_serializes_event_in_wire_shape() {
        let record = ActionRecord {
            message: "m".into(),
            event: Event::remove_item(3),
        };
        assert_eq!(
            serde_json::to_value(&record).expect("serialize"),
            serde_json::json!({"message": "m", "event": {"kind": "REMOVE_ITEM", "payload": {"itemId": 3}}})
        );
    }
}
