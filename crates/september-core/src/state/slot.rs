use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::codec::{JsonCodec, SlotCodec};
use super::coordinator::SaveSink;
use super::debounce::Debouncer;
use crate::system::KeyedStore;

/// Per-slot tuning.
#[derive(Clone)]
pub struct SlotConfig {
    /// Quiet period before a mutation is written back.
    pub debounce: Duration,
    /// Where to publish successful-save timestamps (usually
    /// [`PersistenceCoordinator::sink`](super::PersistenceCoordinator::sink)).
    pub sink: Option<SaveSink>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(1000), sink: None }
    }
}

struct SlotState<T> {
    value: T,
    loading: bool,
    last_saved: Option<DateTime<Utc>>,
}

struct SlotInner<T> {
    key: String,
    default: T,
    store: Option<Arc<dyn KeyedStore>>,
    codec: Arc<dyn SlotCodec<T>>,
    debouncer: Debouncer,
    sink: Option<SaveSink>,
    state: Mutex<SlotState<T>>,
    ready_tx: watch::Sender<bool>,
    /// Serializes writes for this slot, so a forced save always lands after
    /// any debounced write already in flight.
    write_gate: tokio::sync::Mutex<()>,
}

/// One named binding between an in-memory value and a storage key.
///
/// On bind, the stored value is loaded asynchronously; until it resolves,
/// reads see the default and the slot reports loading. Mutations update
/// memory immediately (reads always trust memory) and, once loading has
/// settled, arm a debounced write-back: bursts of mutations collapse into a
/// single store write of the final value. Without a backing store the slot
/// is memory-only and never touches storage.
///
/// Handles are cheap to clone. Dropping the last handle cancels a pending
/// debounced write without flushing it — callers that need the final state
/// durable call [`Slot::force_save`] first.
pub struct Slot<T> {
    inner: Arc<SlotInner<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> std::fmt::Debug for Slot<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.inner.key)
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Bind `key` with the default config: 1s debounce, plain JSON codec.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(store: Option<Arc<dyn KeyedStore>>, key: &str, default: T) -> Self {
        Self::bind_with(store, key, default, SlotConfig::default(), Arc::new(JsonCodec))
    }
}

impl<T> Slot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind `key` with explicit config and codec.
    ///
    /// Spawns the initial load if a store is present. Must be called from
    /// within a tokio runtime.
    pub fn bind_with(
        store: Option<Arc<dyn KeyedStore>>,
        key: &str,
        default: T,
        config: SlotConfig,
        codec: Arc<dyn SlotCodec<T>>,
    ) -> Self {
        let loading = store.is_some();
        let (ready_tx, _) = watch::channel(!loading);
        let inner = Arc::new(SlotInner {
            key: key.to_string(),
            default: default.clone(),
            store,
            codec,
            debouncer: Debouncer::new(config.debounce),
            sink: config.sink,
            state: Mutex::new(SlotState { value: default, loading, last_saved: None }),
            ready_tx,
            write_gate: tokio::sync::Mutex::new(()),
        });
        if let Some(store) = inner.store.clone() {
            tokio::spawn(run_load(Arc::clone(&inner), store));
        }
        Slot { inner }
    }

    /// The storage key this slot is bound to.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Whether the initial load is still in flight.
    ///
    /// `false` from the first observation when no store is present.
    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().unwrap().loading
    }

    /// Wait until the initial load has settled (immediately if it already
    /// has, or if there is no store).
    pub async fn ready(&self) {
        let mut rx = self.inner.ready_tx.subscribe();
        // The sender lives in `inner`, which we hold; wait_for cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Current in-memory value. Reflects the most recent mutation even
    /// while the corresponding write is still pending or in flight.
    pub fn get(&self) -> T {
        self.inner.state.lock().unwrap().value.clone()
    }

    /// When the last successful store write for this slot resolved.
    /// `None` until a write succeeds; never set optimistically.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.inner.state.lock().unwrap().last_saved
    }

    /// Replace the value. Memory is updated immediately; a debounced write
    /// is armed unless the initial load is still in flight or there is no
    /// store.
    pub fn set(&self, value: T) {
        let scheduling = {
            let mut state = self.inner.state.lock().unwrap();
            state.value = value;
            !state.loading
        };
        if scheduling {
            self.schedule_save();
        }
    }

    /// Mutate the value in place. Same write-back rules as [`Slot::set`].
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        let scheduling = {
            let mut state = self.inner.state.lock().unwrap();
            mutate(&mut state.value);
            !state.loading
        };
        if scheduling {
            self.schedule_save();
        }
    }

    /// Cancel any pending debounce timer and write the current value now.
    ///
    /// When this returns, the value at the time of the call is durable
    /// unless the write failed (which is logged, not returned). No-op
    /// without a store.
    pub async fn force_save(&self) {
        if self.inner.store.is_none() {
            return;
        }
        self.inner.debouncer.cancel();
        write_current(&self.inner).await;
    }

    /// Delete the key from the store and reset memory to the default.
    ///
    /// Cancels any pending write so the cleared key cannot reappear from a
    /// stale timer; calling twice in a row is safe. No-op without a store.
    pub async fn clear(&self) {
        let Some(store) = self.inner.store.as_ref() else {
            return;
        };
        self.inner.debouncer.cancel();
        let _gate = self.inner.write_gate.lock().await;
        match store.delete(&self.inner.key).await {
            Ok(()) => {
                let mut state = self.inner.state.lock().unwrap();
                state.value = self.inner.default.clone();
                state.last_saved = None;
            }
            Err(err) => {
                warn!(key = %self.inner.key, %err, "failed to clear stored value");
            }
        }
    }

    fn schedule_save(&self) {
        if self.inner.store.is_none() {
            return;
        }
        // The armed task holds only a weak handle: if every `Slot` clone is
        // dropped before the timer fires, the write is dropped with it.
        let weak: Weak<SlotInner<T>> = Arc::downgrade(&self.inner);
        self.inner.debouncer.arm(async move {
            if let Some(inner) = weak.upgrade() {
                write_current(&inner).await;
            }
        });
    }
}

async fn run_load<T>(inner: Arc<SlotInner<T>>, store: Arc<dyn KeyedStore>)
where
    T: Clone + Send + Sync + 'static,
{
    let loaded = match store.get(&inner.key).await {
        Ok(Some(raw)) => match inner.codec.decode(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %inner.key, %err, "failed to decode stored value; using default");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(key = %inner.key, %err, "failed to load stored value; using default");
            None
        }
    };
    let value = loaded.unwrap_or_else(|| inner.default.clone());
    {
        let mut state = inner.state.lock().unwrap();
        state.value = value;
        state.loading = false;
    }
    // send_replace: the flag must flip even when nobody subscribed yet.
    inner.ready_tx.send_replace(true);
}

async fn write_current<T>(inner: &SlotInner<T>)
where
    T: Clone + Send + Sync,
{
    let Some(store) = inner.store.as_ref() else {
        return;
    };
    let _gate = inner.write_gate.lock().await;
    // Snapshot under the gate so the last write to land carries the
    // freshest value.
    let value = inner.state.lock().unwrap().value.clone();
    let encoded = match inner.codec.encode(&value) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!(key = %inner.key, %err, "failed to encode value; skipping save");
            return;
        }
    };
    match store.set(&inner.key, encoded).await {
        Ok(()) => {
            let at = Utc::now();
            inner.state.lock().unwrap().last_saved = Some(at);
            if let Some(sink) = &inner.sink {
                sink.record(at);
            }
            debug!(key = %inner.key, "saved");
        }
        Err(err) => {
            warn!(key = %inner.key, %err, "failed to persist value; keeping in-memory state");
        }
    }
}
