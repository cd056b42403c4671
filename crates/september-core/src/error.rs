use thiserror::Error;

/// Errors surfaced by [`KeyedStore`](crate::system::KeyedStore) backends.
///
/// Slot-level operations absorb these (log and fall back); only the store
/// implementations themselves propagate them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure (IPC bridge gone, database closed, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors from the desktop notification sender.
///
/// Callers treat notifications as best-effort and swallow these.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifications are not supported on this host")]
    Unsupported,

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
