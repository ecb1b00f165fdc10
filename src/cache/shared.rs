//! Shared Cache Module
//!
//! Thread-safe handle to a [`PartitionedCache`] plus the async memoizing lookup.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheCategory, CachePolicy, CacheStats, ClockRef, PartitionedCache};

// == Shared Cache ==
/// Cloneable handle; all clones see the same cache.
///
/// Every operation takes the lock once, so read-modify-write sequences such
/// as eviction-on-put are atomic with respect to other callers. The lock is
/// never held while a producer runs.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<PartitionedCache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    // == Constructor ==
    pub fn new(policy: CachePolicy) -> Self {
        Self::from_cache(PartitionedCache::new(policy))
    }

    pub fn with_clock(policy: CachePolicy, clock: ClockRef) -> Self {
        Self::from_cache(PartitionedCache::with_clock(policy, clock))
    }

    pub fn from_cache(cache: PartitionedCache<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    // == Get Or Set ==
    /// Returns the cached value, or runs `producer` and caches its result.
    ///
    /// A hit never calls `producer`. On a miss the producer's error is
    /// returned unchanged and nothing is stored. A successful result is
    /// returned even when the category refuses to store it.
    ///
    /// Concurrent misses on the same key each run their producer; the last
    /// store wins.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        category: CacheCategory,
        key: &str,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(category, key).await {
            return Ok(value);
        }

        debug!(%category, key, "cache miss, running producer");
        let value = producer().await?;
        self.put(category, key, value.clone()).await;
        Ok(value)
    }

    // == Delegating Operations ==
    pub async fn get(&self, category: CacheCategory, key: &str) -> Option<V> {
        self.inner.write().await.get(category, key)
    }

    pub async fn put(&self, category: CacheCategory, key: &str, value: V) -> bool {
        self.inner.write().await.put(category, key, value)
    }

    pub async fn delete(&self, category: CacheCategory, key: &str) -> bool {
        self.inner.write().await.delete(category, key)
    }

    pub async fn set_ttl(&self, category: CacheCategory, ttl: Duration) {
        self.inner.write().await.set_ttl(category, ttl);
    }

    pub async fn ttl(&self, category: CacheCategory) -> Option<Duration> {
        self.inner.read().await.ttl(category)
    }

    pub async fn set_max_entries(&self, category: CacheCategory, max: Option<usize>) {
        self.inner.write().await.set_max_entries(category, max);
    }

    pub async fn max_entries(&self, category: CacheCategory) -> Option<usize> {
        self.inner.read().await.max_entries(category)
    }

    pub async fn reduce_entries(&self, category: CacheCategory, reduce_to: Option<usize>) -> usize {
        self.inner.write().await.reduce_entries(category, reduce_to)
    }

    pub async fn get_keys(&self, category: CacheCategory) -> Vec<String> {
        self.inner.read().await.get_keys(category)
    }

    pub async fn clear(&self, category: Option<CacheCategory>) {
        self.inner.write().await.clear(category);
    }

    pub async fn sweep_expired(&self) -> usize {
        self.inner.write().await.sweep_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}
