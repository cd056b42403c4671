use async_trait::async_trait;

use crate::error::NotifyError;

/// A desktop notification payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }
}

/// Desktop notification sender trait.
///
/// Notifications are best-effort throughout the core: callers log delivery
/// failures and move on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, note: Notification) -> Result<(), NotifyError>;
}
