use std::sync::Arc;

use super::{ConfirmPrompt, KeyedStore, Notifier};

/// Application-lifecycle control exposed by the shell.
pub trait HostControl: Send + Sync {
    /// Ask the shell to reload application state (e.g. after a bulk wipe).
    fn request_reload(&self);
}

/// The capabilities the current runtime provides.
///
/// Every field is optional: running outside the desktop shell (browser
/// preview, tests without a backend) yields a detached host, and the core
/// degrades gracefully — slots become memory-only, notifications and
/// reloads become no-ops, destructive operations refuse to run.
#[derive(Clone, Default)]
pub struct Host {
    pub store: Option<Arc<dyn KeyedStore>>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub prompt: Option<Arc<dyn ConfirmPrompt>>,
    pub control: Option<Arc<dyn HostControl>>,
}

impl Host {
    /// A host with no capabilities at all.
    pub fn detached() -> Self {
        Self::default()
    }

    /// A host that only provides storage.
    pub fn with_store(store: Arc<dyn KeyedStore>) -> Self {
        Self { store: Some(store), ..Self::default() }
    }

    /// Whether a durable backing store is available.
    ///
    /// This is the platform-presence flag: absent, slots run memory-only.
    pub fn is_present(&self) -> bool {
        self.store.is_some()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("store", &self.store.is_some())
            .field("notifier", &self.notifier.is_some())
            .field("prompt", &self.prompt.is_some())
            .field("control", &self.control.is_some())
            .finish()
    }
}
