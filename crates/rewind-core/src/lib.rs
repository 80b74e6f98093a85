//! rewind-core library.
//!
//! An event-sourced item store: a [`DataStore`] is only ever changed by
//! folding an [`Event`] through the pure [`reduce`] function, and a
//! [`HistoryStore`] keeps full snapshots on linear undo/redo stacks.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in the core; `anyhow::Result` for
//!   config loading and binaries.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod logger;
pub mod model;
pub mod produce;
pub mod reducer;
pub mod script;
pub mod validate;

pub use event::{Event, EventKind, Payload};
pub use history::HistoryStore;
pub use model::item::Item;
pub use model::store::{DataStore, DuplicatePolicy};
pub use produce::produce;
pub use reducer::{reduce, reduce_with};
