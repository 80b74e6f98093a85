//! JSON Lines scripts of dispatch/undo/redo steps.
//!
//! ```text
//! # comments and blank lines are skipped
//! {"dispatch": {"kind": "ADD_ITEM", "payload": {"item": {"id": 1, "name": "Product 1"}}}}
//! {"dispatch": {"kind": "REMOVE_ITEM", "payload": {"itemId": 1}}}
//! {"undo": 1}
//! {"redo": 1}
//! ```
//!
//! Step counts are signed on the wire; anything `<= 0` means zero steps.

use crate::error::ErrorCode;
use crate::event::Event;
use crate::history::HistoryStore;
use crate::logger::Observer;
use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStep {
    Dispatch(Event),
    Undo(i64),
    Redo(i64),
}

/// Convert a wire step count to an iteration count.
#[must_use]
pub fn step_count(raw: i64) -> usize {
    usize::try_from(raw.max(0)).unwrap_or(usize::MAX)
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

impl ScriptError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ScriptReadFailed,
            Self::Parse { .. } => ErrorCode::ScriptParseError,
            Self::Rejected { source, .. } => source.code(),
        }
    }
}

/// A parsed step together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: ScriptStep,
}

/// Parse script text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for the first line that is not a valid step.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str::<ScriptStep>(trimmed).map_err(|source| {
            ScriptError::Parse {
                line: idx + 1,
                source,
            }
        })?;
        lines.push(ScriptLine {
            line: idx + 1,
            step,
        });
    }
    Ok(lines)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns [`ScriptError::Read`] if the file cannot be read, or
/// [`ScriptError::Parse`] as for [`parse_script`].
pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// How [`replay`] dispatches events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Validate each event and stop at the first rejection.
    pub strict: bool,
    /// Message handed to the observer alongside each dispatched event.
    pub message: String,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            strict: false,
            message: "Event Dispatched".to_string(),
        }
    }
}

/// Counts of what a replay actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub undone: usize,
    pub redone: usize,
}

/// Run `lines` against `store` in order, reporting each dispatch to `observer`.
///
/// # Errors
///
/// In strict mode, returns [`ScriptError::Rejected`] for the first event
/// that fails validation. Steps before it stay applied.
pub fn replay(
    store: &mut HistoryStore,
    lines: &[ScriptLine],
    options: &ReplayOptions,
    observer: &mut dyn Observer,
) -> Result<ReplaySummary, ScriptError> {
    let mut summary = ReplaySummary::default();
    for ScriptLine { line, step } in lines {
        match step {
            ScriptStep::Dispatch(event) => {
                if options.strict {
                    store
                        .try_dispatch(event)
                        .map_err(|source| ScriptError::Rejected {
                            line: *line,
                            source,
                        })?;
                } else {
                    store.dispatch(event);
                }
                observer.observe(&options.message, event);
                summary.dispatched += 1;
            }
            ScriptStep::Undo(n) => summary.undone += store.undo(step_count(*n)),
            ScriptStep::Redo(n) => summary.redone += store.redo(step_count(*n)),
        }
    }
    debug!(
        dispatched = summary.dispatched,
        undone = summary.undone,
        redone = summary.redone,
        "replay finished"
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
