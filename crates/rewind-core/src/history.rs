//! Linear undo/redo history over [`DataStore`] snapshots.
//!
//! A [`HistoryStore`] owns the current state and two stacks of full
//! snapshots, both ordered oldest first:
//!
//! - `dispatch` pushes the pre-event state onto the undo stack, clears the
//!   redo stack, and replaces the current state with the reduced one.
//! - `undo` moves the current state onto the redo stack and restores the
//!   most recent undo entry, up to `steps` times.
//! - `redo` is the mirror image.
//!
//! A dispatch after one or more undos discards the redo stack for good;
//! there is no redo tree. None of the operations fail: running out of
//! history just ends the loop early.
//!
//! The store is not `Clone` and every mutation takes
//! `&mut self`, so it has exactly one owner. Share it across threads only
//! behind an external lock.

use crate::event::Event;
use crate::model::store::{DataStore, DuplicatePolicy};
use crate::reducer::reduce_with;
use crate::validate::{ValidationError, validate};
use std::mem;
use tracing::debug;

#[derive(Debug, Default)]
pub struct HistoryStore {
    current: DataStore,
    undo_stack: Vec<DataStore>,
    redo_stack: Vec<DataStore>,
    policy: DuplicatePolicy,
}

impl HistoryStore {
    /// Empty state, empty stacks, [`DuplicatePolicy::Append`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `state` with no history behind it.
    #[must_use]
    pub fn with_state(state: DataStore) -> Self {
        Self {
            current: state,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    #[must_use]
    pub const fn current(&self) -> &DataStore {
        &self.current
    }

    #[must_use]
    pub fn into_current(self) -> DataStore {
        self.current
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo snapshots, oldest first.
    #[must_use]
    pub fn undo_snapshots(&self) -> &[DataStore] {
        &self.undo_stack
    }

    /// Redo snapshots, oldest first. The last entry is what `redo(1)` restores.
    #[must_use]
    pub fn redo_snapshots(&self) -> &[DataStore] {
        &self.redo_stack
    }

    /// Record the current state and apply `event` to it.
    ///
    /// A history entry is recorded even when the event reduces to a no-op,
    /// so every dispatch is undone by exactly one `undo(1)`.
    pub fn dispatch(&mut self, event: &Event) {
        let next = reduce_with(&self.current, event, self.policy);
        let prev = mem::replace(&mut self.current, next);
        self.undo_stack.push(prev);
        self.redo_stack.clear();
        debug!(
            kind = %event.kind,
            items = self.current.len(),
            undo_depth = self.undo_stack.len(),
            "dispatched event"
        );
    }

    /// Validate `event` against the current state, then dispatch it.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`validate`]; the history is
    /// left exactly as it was.
    pub fn try_dispatch(&mut self, event: &Event) -> Result<(), ValidationError> {
        if let Err(err) = validate(&self.current, event, self.policy) {
            debug!(kind = %event.kind, code = %err.code(), "rejected event: {err}");
            return Err(err);
        }
        self.dispatch(event);
        Ok(())
    }

    /// Step back up to `steps` times. Returns the number of steps taken.
    pub fn undo(&mut self, steps: usize) -> usize {
        let taken = travel(
            &mut self.current,
            &mut self.undo_stack,
            &mut self.redo_stack,
            steps,
        );
        debug!(
            requested = steps,
            taken,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo"
        );
        taken
    }

    /// Step forward up to `steps` times. Returns the number of steps taken.
    pub fn redo(&mut self, steps: usize) -> usize {
        let taken = travel(
            &mut self.current,
            &mut self.redo_stack,
            &mut self.undo_stack,
            steps,
        );
        debug!(
            requested = steps,
            taken,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        taken
    }

    /// `undo(1)`.
    pub fn undo_once(&mut self) -> bool {
        self.undo(1) == 1
    }

    /// `redo(1)`.
    pub fn redo_once(&mut self) -> bool {
        self.redo(1) == 1
    }
}

/// Pop from `from` into `current`, pushing the displaced state onto `to`.
fn travel(
    current: &mut DataStore,
    from: &mut Vec<DataStore>,
    to: &mut Vec<DataStore>,
    steps: usize,
) -> usize {
    let mut taken = 0;
    while taken < steps {
        let Some(target) = from.pop() else {
            break;
        };
        to.push(mem::replace(current, target));
        taken += 1;
    }
    taken
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
