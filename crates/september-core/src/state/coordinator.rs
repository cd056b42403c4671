use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::system::{ConfirmPrompt, Host, HostControl, KeyedStore, Notification, Notifier};

const CLEAR_CONFIRM: &str =
    "Are you sure you want to clear all data? This action cannot be undone.";
const CLEAR_FAILED: &str = "Failed to clear data. Please try again.";
const CLEARED_TITLE: &str = "All Data Cleared";
const CLEARED_BODY: &str = "All dashboard data has been permanently deleted.";

/// Subscriber handle slots publish successful-save timestamps into.
///
/// Cheap to clone; all clones share the same aggregate. Only the maximum
/// timestamp is retained — no history.
#[derive(Clone, Default)]
pub struct SaveSink {
    last_saved: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl SaveSink {
    /// Record a save that resolved at `at`. Older timestamps are ignored.
    pub fn record(&self, at: DateTime<Utc>) {
        let mut last = self.last_saved.lock().unwrap();
        if last.map_or(true, |prev| at > prev) {
            *last = Some(at);
        }
    }

    fn get(&self) -> Option<DateTime<Utc>> {
        *self.last_saved.lock().unwrap()
    }

    fn reset(&self) {
        *self.last_saved.lock().unwrap() = None;
    }
}

/// Aggregates "most recent save" across any number of slots and owns the
/// one destructive bulk operation, wiping the whole store.
///
/// An explicitly constructed object, passed down to whoever needs it —
/// tests can run as many independent coordinators as they like.
#[derive(Clone)]
pub struct PersistenceCoordinator {
    sink: SaveSink,
    store: Option<Arc<dyn KeyedStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    prompt: Option<Arc<dyn ConfirmPrompt>>,
    control: Option<Arc<dyn HostControl>>,
}

impl PersistenceCoordinator {
    pub fn new(host: &Host) -> Self {
        Self {
            sink: SaveSink::default(),
            store: host.store.clone(),
            notifier: host.notifier.clone(),
            prompt: host.prompt.clone(),
            control: host.control.clone(),
        }
    }

    /// The sink to hand to slots via
    /// [`SlotConfig::sink`](super::SlotConfig).
    pub fn sink(&self) -> SaveSink {
        self.sink.clone()
    }

    /// Most recent save observed across all attached slots, or `None` if
    /// nothing has been saved since construction (or since a wipe).
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.sink.get()
    }

    /// Push-driven variant for callers that compare slot timestamps
    /// themselves: records "now" as the most recent save.
    pub fn update_last_saved(&self) {
        self.sink.record(Utc::now());
    }

    /// Wipe every key in the store, after user confirmation.
    ///
    /// Returns `false` without side effects when there is no store, no
    /// confirmation prompt, or the user declines. On success the aggregate
    /// timestamp resets, a notification goes out (best-effort) and the
    /// shell is asked to reload application state.
    pub async fn clear_all_data(&self) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        let Some(prompt) = self.prompt.as_ref() else {
            debug!("clear-all requested without a confirmation prompt; refusing");
            return false;
        };
        if !prompt.confirm(CLEAR_CONFIRM).await {
            return false;
        }
        if let Err(err) = store.clear().await {
            warn!(%err, "failed to clear all data");
            prompt.alert(CLEAR_FAILED).await;
            return false;
        }
        self.sink.reset();
        if let Some(notifier) = self.notifier.as_ref() {
            let note = Notification::new(CLEARED_TITLE, CLEARED_BODY);
            if let Err(err) = notifier.notify(note).await {
                debug!(%err, "clear-all notification not delivered");
            }
        }
        if let Some(control) = self.control.as_ref() {
            control.request_reload();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn sink_keeps_the_maximum() {
        let sink = SaveSink::default();
        let now = Utc::now();
        sink.record(now);
        sink.record(now - TimeDelta::seconds(10));
        assert_eq!(sink.get(), Some(now));

        let later = now + TimeDelta::seconds(5);
        sink.record(later);
        assert_eq!(sink.get(), Some(later));
    }

    #[test]
    fn update_last_saved_records_now() {
        let coordinator = PersistenceCoordinator::new(&Host::detached());
        assert!(coordinator.last_saved().is_none());
        coordinator.update_last_saved();
        assert!(coordinator.last_saved().is_some());
    }

    #[tokio::test]
    async fn clear_all_without_store_refuses() {
        let coordinator = PersistenceCoordinator::new(&Host::detached());
        assert!(!coordinator.clear_all_data().await);
    }
}
