//! `rw demo`: add an item, remove it, then undo and redo the removal.

use crate::output::{OutputMode, pretty_items, pretty_section, render_mode};
use rewind_core::config::RewindConfig;
use rewind_core::logger::action_logger;
use rewind_core::{DataStore, Event, HistoryStore, Item};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    pub state: DataStore,
}

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
}

/// Run the walkthrough against a fresh store and return every intermediate state.
pub fn demo_steps(config: &RewindConfig) -> DemoReport {
    let mut store = HistoryStore::with_policy(config.store.duplicate_ids);
    let log = action_logger(config.log.message.clone());
    let mut steps = Vec::new();

    let add = Event::add_item(Item::new(1, "Product 1"));
    let remove = Event::remove_item(1);

    for event in [add, remove] {
        store.dispatch(&event);
        if config.log.enabled {
            log(&event);
        }
        steps.push(DemoStep {
            label: "dispatch",
            event: Some(event),
            state: store.current().clone(),
        });
    }

    store.undo_once();
    steps.push(DemoStep {
        label: "undo",
        event: None,
        state: store.current().clone(),
    });

    store.redo_once();
    steps.push(DemoStep {
        label: "redo",
        event: None,
        state: store.current().clone(),
    });

    DemoReport { steps }
}

pub fn run_demo(config: &RewindConfig, output: OutputMode) -> anyhow::Result<()> {
    let report = demo_steps(config);
    render_mode(
        output,
        &report,
        |r, w| {
            for step in &r.steps {
                match &step.event {
                    Some(event) => writeln!(w, "{}\t{}\t{}", step.label, event, step.state)?,
                    None => writeln!(w, "{}\t-\t{}", step.label, step.state)?,
                }
            }
            Ok(())
        },
        |r, w| {
            for step in &r.steps {
                let heading = match &step.event {
                    Some(event) => format!("{} {}", step.label, event.kind),
                    None => step.label.to_string(),
                };
                pretty_section(w, &heading)?;
                pretty_items(w, &step.state)?;
                writeln!(w)?;
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_walks_add_remove_undo_redo() {
        let report = demo_steps(&RewindConfig::default());
        let labels: Vec<_> = report.steps.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["dispatch", "dispatch", "undo", "redo"]);

        let sizes: Vec<_> = report.steps.iter().map(|s| s.state.len()).collect();
        assert_eq!(sizes, vec![1, 0, 1, 0]);
        assert_eq!(report.steps[2].state.items, vec![Item::new(1, "Product 1")]);
    }

    #[test]
    fn demo_report_json_omits_missing_event() {
        let report = demo_steps(&RewindConfig::default());
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["steps"][0]["event"]["kind"], "ADD_ITEM");
        assert!(json["steps"][2].get("event").is_none());
    }
}
