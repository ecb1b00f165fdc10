//! Partitioned Cache Module
//!
//! Category-aware layer over [`EntryStore`]: every key is namespaced by its
//! [`CacheCategory`], and each category has its own TTL and capacity.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheCategory, CachePolicy, CacheStats, ClockRef, EntryStore, SystemClock};

// == Partitioned Cache ==
/// One physical store shared by all categories.
///
/// Eviction is strictly oldest-first within a category, by the store's
/// insertion order. Entries of other categories never count against a
/// category's bound.
#[derive(Debug)]
pub struct PartitionedCache<V> {
    store: EntryStore<V>,
    policy: CachePolicy,
    stats: CacheStats,
}

impl<V: Clone> PartitionedCache<V> {
    // == Constructor ==
    /// Creates a cache with the given initial policy on the system clock.
    pub fn new(policy: CachePolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(policy: CachePolicy, clock: ClockRef) -> Self {
        Self {
            store: EntryStore::with_clock(Duration::ZERO, clock),
            policy,
            stats: CacheStats::new(),
        }
    }

    // == TTL ==
    /// Changes the TTL of a category.
    ///
    /// The new TTL also applies to every entry already in the category, with
    /// their original insertion timestamps.
    pub fn set_ttl(&mut self, category: CacheCategory, ttl: Duration) {
        if self.policy.ttl(category) == Some(ttl) {
            return;
        }

        let keys = self.get_keys(category);
        for key in &keys {
            self.store.set_ttl(key, ttl);
        }
        self.policy.ttl.insert(category, ttl);

        debug!(%category, ?ttl, updated = keys.len(), "category TTL changed");
    }

    /// Configured TTL of a category, if any.
    pub fn ttl(&self, category: CacheCategory) -> Option<Duration> {
        self.policy.ttl(category)
    }

    // == Capacity ==
    /// Changes the capacity of a category (`None` = unbounded).
    ///
    /// Lowering the bound below the current count evicts the oldest surplus
    /// entries right away.
    pub fn set_max_entries(&mut self, category: CacheCategory, max: Option<usize>) {
        if max.is_some() {
            self.reduce_entries(category, max);
        }
        self.policy.max_entries.insert(category, max);
    }

    /// Capacity of a category, `None` when unbounded.
    pub fn max_entries(&self, category: CacheCategory) -> Option<usize> {
        self.policy.max_entries(category)
    }

    // == Get ==
    /// Looks up `key` in `category`.
    pub fn get(&mut self, category: CacheCategory, key: &str) -> Option<V> {
        let value = self.store.get(&category.namespaced(key)).cloned();
        if value.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        value
    }

    // == Put ==
    /// Stores `value` under `key` in `category`.
    ///
    /// Returns `false` without touching the store when the category's
    /// capacity is zero. A new key in a full category first evicts the oldest
    /// entries to make room for exactly one more; overwriting an existing key
    /// needs no room and evicts nothing.
    pub fn put(&mut self, category: CacheCategory, key: &str, value: V) -> bool {
        let store_key = category.namespaced(key);

        match self.max_entries(category) {
            Some(0) => {
                self.stats.record_rejection();
                debug!(%category, key, "store rejected, category capacity is zero");
                return false;
            }
            Some(max) if !self.store.contains_key(&store_key) => {
                self.reduce_entries(category, Some(max - 1));
            }
            _ => {}
        }

        self.store.set(&store_key, value, self.policy.ttl(category));
        self.stats.set_total_entries(self.store.len());
        true
    }

    // == Delete ==
    /// Removes `key` from `category`. Returns whether anything was removed.
    pub fn delete(&mut self, category: CacheCategory, key: &str) -> bool {
        let removed = self.store.delete(&category.namespaced(key));
        self.stats.set_total_entries(self.store.len());
        removed
    }

    // == Reduce Entries ==
    /// Trims a category to at most `reduce_to` entries, oldest first.
    ///
    /// Defaults to the category's configured capacity; an unbounded category
    /// with no explicit target is left alone. Returns the number of entries
    /// evicted.
    pub fn reduce_entries(&mut self, category: CacheCategory, reduce_to: Option<usize>) -> usize {
        let Some(target) = reduce_to.or_else(|| self.max_entries(category)) else {
            return 0;
        };

        let count = self.len_of(category);
        if count <= target {
            return 0;
        }

        let surplus = count - target;
        let victims: Vec<String> = self
            .store
            .iter_keys()
            .filter(|key| category.owns(key))
            .take(surplus)
            .cloned()
            .collect();
        for key in &victims {
            self.store.delete(key);
        }

        self.stats.record_evictions(surplus);
        self.stats.set_total_entries(self.store.len());
        debug!(%category, evicted = surplus, remaining = target, "evicted oldest entries");
        surplus
    }

    // == Keys ==
    /// Namespaced keys of a category, oldest first.
    pub fn get_keys(&self, category: CacheCategory) -> Vec<String> {
        self.store
            .iter_keys()
            .filter(|key| category.owns(key))
            .cloned()
            .collect()
    }

    // == Clear ==
    /// Clears one category, or everything when `category` is `None`.
    pub fn clear(&mut self, category: Option<CacheCategory>) {
        match category {
            None => self.store.clear(),
            Some(category) => {
                for key in self.get_keys(category) {
                    self.store.delete(&key);
                }
            }
        }
        self.stats.set_total_entries(self.store.len());
    }

    // == Sweep Expired ==
    /// Removes every entry whose TTL has elapsed. Returns how many were removed.
    pub fn sweep_expired(&mut self) -> usize {
        let removed = self.store.sweep_expired().len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.store.len());
        removed
    }

    // == Inspection ==
    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of entries in one category.
    pub fn len_of(&self, category: CacheCategory) -> usize {
        self.store.iter_keys().filter(|key| category.owns(key)).count()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    /// Underlying store, for metadata inspection.
    pub fn store(&self) -> &EntryStore<V> {
        &self.store
    }
}
