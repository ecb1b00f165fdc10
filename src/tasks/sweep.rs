//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;

// == Sweep Handle ==
/// Owner of a running sweep task.
///
/// Dropping the handle aborts the task, so the sweep never outlives the code
/// that started it.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Asks the task to finish and waits for it.
    pub async fn stop(mut self) {
        self.shutdown.notify_one();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("TTL sweep task ended abnormally: {}", e);
            }
        }
    }

    /// Cancels the task without waiting.
    pub fn abort(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawns a task that sweeps expired entries out of `cache` every `interval`.
///
/// The first sweep happens one full interval after the spawn. A zero
/// interval disables sweeping: the returned handle owns no task.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(policy);
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task<V>(cache: SharedCache<V>, interval: Duration) -> SweepHandle
where
    V: Clone + Send + Sync + 'static,
{
    let shutdown = Arc::new(Notify::new());
    if interval.is_zero() {
        warn!("TTL sweep interval is zero, expired entries will not be swept");
        return SweepHandle {
            shutdown,
            task: None,
        };
    }
    let signal = shutdown.clone();

    let task = tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = signal.notified() => {
                    info!("TTL sweep task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.sweep_expired().await;
                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
            }
        }
    });

    SweepHandle {
        shutdown,
        task: Some(task),
    }
}
