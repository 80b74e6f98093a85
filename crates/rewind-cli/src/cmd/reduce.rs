//! `rw reduce`: apply one event to one state, without any history.

use crate::output::{CliError, OutputMode, pretty_items, pretty_kv, render_error, render_mode};
use clap::Args;
use rewind_core::config::RewindConfig;
use rewind_core::error::ErrorCode;
use rewind_core::validate::validate;
use rewind_core::{DataStore, Event, reduce_with};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// Event JSON, e.g. '{"kind":"REMOVE_ITEM","payload":{"itemId":1}}'.
    #[arg(short, long)]
    pub event: String,

    /// Starting state JSON.
    #[arg(short, long, default_value = r#"{"items":[]}"#)]
    pub state: String,

    /// Refuse events that validation rejects instead of reducing them to a no-op.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ReduceReport {
    changed: bool,
    state: DataStore,
}

fn parse_arg<T: DeserializeOwned>(
    raw: &str,
    what: &str,
    output: OutputMode,
) -> anyhow::Result<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            let message = format!("invalid {what} JSON: {e}");
            render_error(
                output,
                &CliError::with_code(&message, ErrorCode::MalformedEvent),
            )?;
            anyhow::bail!("{message}");
        }
    }
}

pub fn run_reduce(
    args: &ReduceArgs,
    config: &RewindConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let state: DataStore = parse_arg(&args.state, "state", output)?;
    let event: Event = parse_arg(&args.event, "event", output)?;
    let policy = config.store.duplicate_ids;

    if args.strict {
        if let Err(e) = validate(&state, &event, policy) {
            render_error(output, &CliError::with_code(e.to_string(), e.code()))?;
            anyhow::bail!("{e}");
        }
    }

    let next = reduce_with(&state, &event, policy);
    let report = ReduceReport {
        changed: next != state,
        state: next,
    };

    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}", r.state),
        |r, w| {
            pretty_kv(w, "changed", if r.changed { "yes" } else { "no" })?;
            pretty_items(w, &r.state)
        },
    )
}
