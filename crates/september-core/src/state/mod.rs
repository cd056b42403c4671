//! Debounced slot persistence.
//!
//! A [`Slot`] binds one storage key to an in-memory value: load-on-bind,
//! read-your-writes from memory, and debounced asynchronous write-back
//! through a per-slot [`SlotCodec`]. The [`PersistenceCoordinator`]
//! aggregates save timestamps across slots and owns the bulk wipe.

mod codec;
mod coordinator;
mod debounce;
mod slot;

pub use codec::{JsonCodec, SlotCodec, SortedSetCodec};
pub use coordinator::{PersistenceCoordinator, SaveSink};
pub use debounce::Debouncer;
pub use slot::{Slot, SlotConfig};
