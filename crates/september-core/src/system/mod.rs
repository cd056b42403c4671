//! Host platform traits — the seam between the persistence core and the
//! desktop shell.
//!
//! Each file captures one capability the shell may or may not provide:
//! durable key-value storage, desktop notifications, user confirmation
//! prompts, and application-lifecycle control. The [`Host`] bundle carries
//! whichever subset is present; an absent capability degrades the core to
//! memory-only or no-op behavior rather than failing.

mod host;
mod notify;
mod prompt;
mod store;

pub use host::{Host, HostControl};
pub use notify::{Notification, Notifier};
pub use prompt::ConfirmPrompt;
pub use store::{KeyedStore, MemoryStore};
