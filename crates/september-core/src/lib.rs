//! State persistence core for the September desktop dashboard.
//!
//! The dashboard keeps every piece of widget state — sticky notes, calendar
//! events, player volume, settings — in named slots of a durable key-value
//! store provided by the desktop shell. This crate is the layer between the
//! widgets and that store:
//!
//! - [`state::Slot`] binds one key to an in-memory value with load-on-bind
//!   and debounced write-back, so bursts of UI mutations collapse into a
//!   single store write.
//! - [`state::PersistenceCoordinator`] aggregates "last saved" across slots
//!   and owns the confirmed clear-everything operation.
//! - [`system`] defines the host traits the shell implements: the
//!   [`system::KeyedStore`] contract, notifications, confirmation prompts
//!   and lifecycle control. All of them are optional — without a shell the
//!   core runs memory-only.
//! - [`model`] holds the typed payloads the dashboard persists.
//!
//! Persistence is best-effort by design: load and write failures are logged
//! and absorbed, and the in-memory value is always the source of truth for
//! the UI.

pub mod error;
pub mod model;
pub mod state;
pub mod system;

pub use error::{NotifyError, StoreError};
pub use state::{PersistenceCoordinator, Slot, SlotConfig};
pub use system::{Host, KeyedStore};
