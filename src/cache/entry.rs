//! Cache Entry Module
//!
//! Defines the structure for individual store entries with TTL bookkeeping.

use std::time::Duration;

// == Cache Entry ==
/// A single stored value and its metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, `None` until the first write
    pub value: Option<V>,
    /// Time-to-live measured from `inserted_at`, zero = never expires
    pub ttl: Duration,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an empty entry timestamped at `now_ms`.
    pub fn new(ttl: Duration, now_ms: u64) -> Self {
        Self {
            value: None,
            ttl,
            inserted_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// Boundary condition: an entry whose age equals its TTL is still live;
    /// it expires once the age strictly exceeds the TTL. A zero TTL never
    /// expires.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        !self.ttl.is_zero() && u128::from(self.age_ms(now_ms)) > self.ttl.as_millis()
    }
}
