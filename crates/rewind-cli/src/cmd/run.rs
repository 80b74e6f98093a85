//! `rw run`: replay a JSON Lines script against a fresh store.
//!
//! ```text
//! rw run steps.jsonl
//! rw run steps.jsonl --strict --json
//! ```

use crate::output::{
    CliError, OutputMode, pretty_items, pretty_kv, pretty_section, render_error, render_mode,
};
use clap::Args;
use rewind_core::config::RewindConfig;
use rewind_core::logger::{ActionLog, ActionRecord, Observer, log_action};
use rewind_core::script::{ReplayOptions, ReplaySummary, load_script, replay};
use rewind_core::{DataStore, DuplicatePolicy, Event, HistoryStore};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file: one JSON step per line.
    pub script: PathBuf,

    /// Validate every event and abort at the first one that fails validation.
    #[arg(long)]
    pub strict: bool,

    /// Include every dispatched event in the JSON report.
    #[arg(long)]
    pub transcript: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    script: String,
    policy: DuplicatePolicy,
    strict: bool,
    #[serde(flatten)]
    summary: ReplaySummary,
    undo_depth: usize,
    redo_depth: usize,
    state: DataStore,
    #[serde(skip_serializing_if = "Option::is_none")]
    actions: Option<Vec<ActionRecord>>,
}

/// Records every dispatch and, when enabled, echoes it to the log.
struct RunObserver {
    log: ActionLog,
    echo: bool,
}

impl Observer for RunObserver {
    fn observe(&mut self, message: &str, event: &Event) {
        if self.echo {
            log_action(message, event);
        }
        self.log.observe(message, event);
    }
}

pub fn run_run(args: &RunArgs, config: &RewindConfig, output: OutputMode) -> anyhow::Result<()> {
    let lines = match load_script(&args.script) {
        Ok(lines) => lines,
        Err(e) => {
            render_error(output, &CliError::with_code(e.to_string(), e.code()))?;
            anyhow::bail!("{e}");
        }
    };

    let mut store = HistoryStore::with_policy(config.store.duplicate_ids);
    let mut observer = RunObserver {
        log: ActionLog::new(),
        echo: config.log.enabled,
    };
    let options = ReplayOptions {
        strict: args.strict,
        message: config.log.message.clone(),
    };

    let summary = match replay(&mut store, &lines, &options, &mut observer) {
        Ok(summary) => summary,
        Err(e) => {
            render_error(output, &CliError::with_code(e.to_string(), e.code()))?;
            anyhow::bail!("{e}");
        }
    };

    let report = RunReport {
        script: args.script.display().to_string(),
        policy: store.policy(),
        strict: args.strict,
        summary,
        undo_depth: store.undo_depth(),
        redo_depth: store.redo_depth(),
        state: store.into_current(),
        actions: args.transcript.then(|| observer.log.into_records()),
    };

    render_mode(
        output,
        &report,
        |r, w| {
            writeln!(
                w,
                "dispatched={} undone={} redone={} undo_depth={} redo_depth={}",
                r.summary.dispatched,
                r.summary.undone,
                r.summary.redone,
                r.undo_depth,
                r.redo_depth
            )?;
            for item in &r.state.items {
                writeln!(w, "{}\t{}", item.id, item.name)?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("Replayed {}", r.script))?;
            pretty_kv(w, "policy", r.policy.as_str())?;
            pretty_kv(w, "dispatched", r.summary.dispatched.to_string())?;
            pretty_kv(w, "undone", r.summary.undone.to_string())?;
            pretty_kv(w, "redone", r.summary.redone.to_string())?;
            pretty_kv(
                w,
                "history",
                format!("{} undo / {} redo", r.undo_depth, r.redo_depth),
            )?;
            writeln!(w)?;
            pretty_section(w, &format!("Items ({})", r.state.len()))?;
            pretty_items(w, &r.state)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: RunArgs,
    }

    #[test]
    fn run_args_defaults() {
        let w = Wrapper::parse_from(["test", "steps.jsonl"]);
        assert_eq!(w.args.script, PathBuf::from("steps.jsonl"));
        assert!(!w.args.strict);
        assert!(!w.args.transcript);
    }

    #[test]
    fn observer_records_even_when_not_echoing() {
        let mut observer = RunObserver {
            log: ActionLog::new(),
            echo: false,
        };
        observer.observe("Event Dispatched", &Event::remove_item(1));
        assert_eq!(observer.log.records().len(), 1);
    }

    #[test]
    fn report_flattens_summary() {
        let report = RunReport {
            script: "s.jsonl".into(),
            policy: DuplicatePolicy::Append,
            strict: false,
            summary: ReplaySummary {
                dispatched: 2,
                undone: 1,
                redone: 0,
            },
            undo_depth: 1,
            redo_depth: 1,
            state: DataStore::new(),
            actions: None,
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["dispatched"], 2);
        assert_eq!(json["policy"], "append");
        assert!(json.get("actions").is_none());
    }
}
