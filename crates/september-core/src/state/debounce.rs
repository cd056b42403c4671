use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;

#[derive(Default)]
struct Armed {
    /// Monotonic arm counter; the task matching `pending` owns the slot.
    seq: u64,
    pending: Option<(u64, AbortHandle)>,
}

/// Single-pending-task debouncer.
///
/// `arm` schedules `work` to run after the configured delay. Arming again
/// before the delay elapses cancels the previous task and starts a fresh
/// delay — bursts collapse to the last armed work. At most one task is
/// pending at any instant.
///
/// Cancellation only reaches a task still parked in its delay: once the
/// delay elapses, the task unregisters itself before running `work`, so
/// work in flight always runs to completion.
pub struct Debouncer {
    delay: Duration,
    armed: Arc<Mutex<Armed>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: Arc::new(Mutex::new(Armed::default())) }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `work` to run after the delay, replacing any pending task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut armed = self.armed.lock().unwrap();
        armed.seq += 1;
        let seq = armed.seq;
        let shared = Arc::clone(&self.armed);
        let delay = self.delay;
        // The lock is held across spawn, so the task cannot observe the
        // registry before its own handle is inserted below.
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut armed = shared.lock().unwrap();
                match armed.pending {
                    Some((s, _)) if s == seq => armed.pending = None,
                    _ => return,
                }
            }
            work.await;
        });
        if let Some((_, prev)) = armed.pending.replace((seq, task.abort_handle())) {
            prev.abort();
        }
    }

    /// Cancel the pending task, if any, before it fires.
    pub fn cancel(&self) {
        if let Some((_, handle)) = self.armed.lock().unwrap().pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is currently waiting to fire.
    pub fn is_armed(&self) -> bool {
        self.armed.lock().unwrap().pending.is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("armed", &self.is_armed())
            .finish()
    }
}
