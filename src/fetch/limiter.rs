//! Request Limiter
//!
//! Bounds outbound request concurrency and spaces out request starts.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;

use crate::config::Config;

// == Limiter ==
/// Runs futures with at most `max_concurrent` in flight and at least
/// `min_interval` between two starts.
#[derive(Debug, Clone)]
pub struct Limiter {
    permits: Arc<Semaphore>,
    min_interval: Duration,
    next_start: Arc<Mutex<Instant>>,
}

impl Limiter {
    pub fn new(max_concurrent: usize, min_interval: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            min_interval,
            next_start: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.limiter_max_concurrent,
            Duration::from_millis(config.limiter_min_interval_ms),
        )
    }

    // == Schedule ==
    /// Waits for a slot, then runs `task` to completion.
    pub async fn schedule<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        // The semaphore is never closed, so a permit always arrives.
        let _permit = self.permits.acquire().await.ok();
        self.wait_turn().await;
        task.await
    }

    async fn wait_turn(&self) {
        let mut next_start = self.next_start.lock().await;
        let now = Instant::now();
        if *next_start > now {
            tokio::time::sleep_until(*next_start).await;
        }
        *next_start = (*next_start).max(now) + self.min_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_schedule_returns_output() {
        let limiter = Limiter::new(2, Duration::ZERO);
        assert_eq!(limiter.schedule(async { 40 + 2 }).await, 42);
    }

    #[tokio::test]
    async fn test_min_interval_spaces_starts() {
        let limiter = Limiter::new(4, Duration::from_millis(50));
        let started = std::time::Instant::now();

        for _ in 0..3 {
            limiter.schedule(async {}).await;
        }

        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_max_concurrent_is_respected() {
        let limiter = Limiter::new(2, Duration::ZERO);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                tokio::spawn(async move {
                    limiter
                        .schedule(async {
                            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                            peak.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            in_flight.fetch_sub(1, Ordering::SeqCst);
                        })
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
