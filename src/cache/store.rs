//! Entry Store Module
//!
//! Flat key/value storage with per-key TTL and insertion-order tracking.
//! The store knows nothing about categories; it only sees opaque string keys.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, ClockRef, InsertionOrder, SystemClock};

// == Entry Store ==
/// Generic key/value storage with TTL bookkeeping.
///
/// `get` never checks expiry: an entry that has outlived its TTL stays
/// readable until the next [`EntryStore::sweep_expired`] pass removes it.
#[derive(Debug)]
pub struct EntryStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Key creation order
    order: InsertionOrder,
    /// TTL for entries created without an explicit one
    default_ttl: Duration,
    clock: ClockRef,
}

impl<V> EntryStore<V> {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for keys created without one (zero = never expires)
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: ClockRef) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            default_ttl,
            clock,
        }
    }

    // == Create If Absent ==
    /// Creates an empty entry for `key` unless one already exists.
    ///
    /// An existing entry keeps its TTL, value and timestamp.
    pub fn create_if_absent(&mut self, key: &str, ttl: Option<Duration>) {
        if self.entries.contains_key(key) {
            return;
        }

        let entry = CacheEntry::new(ttl.unwrap_or(self.default_ttl), self.clock.now_ms());
        self.entries.insert(key.to_string(), entry);
        self.order.push(key);
    }

    // == Get ==
    /// Returns the stored value, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key).and_then(|entry| entry.value.as_ref())
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// `ttl` only applies when the key is new. Overwriting keeps the original
    /// TTL and insertion timestamp, so the expiry countdown is not restarted.
    pub fn set(&mut self, key: &str, value: V, ttl: Option<Duration>) {
        self.create_if_absent(key, ttl);
        if let Some(entry) = self.entries.get_mut(key) {
            entry.value = Some(value);
        }
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Keys ==
    /// Returns all live keys, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.iter_keys().cloned().collect()
    }

    /// Borrowing variant of [`EntryStore::keys`].
    pub fn iter_keys(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Set TTL ==
    /// Updates the TTL of `key`, creating an empty entry if it does not exist.
    ///
    /// Value and insertion timestamp are left untouched.
    pub fn set_ttl(&mut self, key: &str, ttl: Duration) {
        self.create_if_absent(key, Some(ttl));
        if let Some(entry) = self.entries.get_mut(key) {
            entry.ttl = ttl;
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose age exceeds its non-zero TTL.
    ///
    /// Expired keys are collected first and deleted in a second pass.
    /// Returns the removed keys, oldest first.
    pub fn sweep_expired(&mut self) -> Vec<String> {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .order
            .iter()
            .filter(|key| {
                self.entries
                    .get(key.as_str())
                    .is_some_and(|entry| entry.is_expired(now))
            })
            .cloned()
            .collect();

        for key in &expired {
            self.delete(key);
        }

        expired
    }

    // == Inspection ==
    /// Returns the entry metadata for `key`.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_store(default_ttl: Duration) -> (EntryStore<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let store = EntryStore::with_clock(default_ttl, clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: EntryStore<String> = EntryStore::new(Duration::ZERO);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = EntryStore::new(Duration::ZERO);

        store.set("key1", "value1".to_string(), None);

        assert_eq!(store.get("key1").map(String::as_str), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: EntryStore<String> = EntryStore::new(Duration::ZERO);
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_create_if_absent_preserves_existing() {
        let (mut store, _clock) = manual_store(Duration::ZERO);

        store.set("key1", "value1".to_string(), Some(Duration::from_secs(5)));
        store.create_if_absent("key1", Some(Duration::from_secs(99)));

        let entry = store.entry("key1").unwrap();
        assert_eq!(entry.ttl, Duration::from_secs(5));
        assert_eq!(entry.value.as_deref(), Some("value1"));
    }

    #[test]
    fn test_create_if_absent_uses_default_ttl() {
        let (mut store, _clock) = manual_store(Duration::from_secs(42));

        store.create_if_absent("key1", None);

        let entry = store.entry("key1").unwrap();
        assert_eq!(entry.ttl, Duration::from_secs(42));
        assert!(entry.value.is_none());
        assert!(store.get("key1").is_none(), "empty entry reads as absent");
    }

    #[test]
    fn test_store_delete_is_idempotent() {
        let mut store = EntryStore::new(Duration::ZERO);

        store.set("key1", "value1".to_string(), None);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_overwrite_keeps_ttl_and_timestamp() {
        let (mut store, clock) = manual_store(Duration::ZERO);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(1000)));
        clock.advance(Duration::from_millis(600));
        store.set("key1", "value2".to_string(), Some(Duration::from_millis(5000)));

        let entry = store.entry("key1").unwrap();
        assert_eq!(entry.inserted_at, 0);
        assert_eq!(entry.ttl, Duration::from_millis(1000));
        assert_eq!(store.get("key1").map(String::as_str), Some("value2"));
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let mut store = EntryStore::new(Duration::ZERO);

        store.set("c", "1".to_string(), None);
        store.set("a", "2".to_string(), None);
        store.set("b", "3".to_string(), None);
        store.set("c", "4".to_string(), None);

        assert_eq!(store.keys(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_set_ttl_creates_or_updates() {
        let (mut store, clock) = manual_store(Duration::ZERO);

        store.set_ttl("fresh", Duration::from_secs(3));
        assert!(store.contains_key("fresh"));
        assert_eq!(store.entry("fresh").unwrap().ttl, Duration::from_secs(3));

        store.set("key1", "value1".to_string(), Some(Duration::from_secs(1)));
        clock.advance(Duration::from_millis(500));
        store.set_ttl("key1", Duration::from_secs(10));

        let entry = store.entry("key1").unwrap();
        assert_eq!(entry.ttl, Duration::from_secs(10));
        assert_eq!(entry.inserted_at, 0);
        assert_eq!(entry.value.as_deref(), Some("value1"));
    }

    #[test]
    fn test_get_does_not_enforce_expiry() {
        let (mut store, clock) = manual_store(Duration::ZERO);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_secs(1));

        assert!(store.get("key1").is_some(), "stale until swept");
        store.sweep_expired();
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_sweep_removes_every_expired_entry() {
        let (mut store, clock) = manual_store(Duration::ZERO);

        store.set("short1", "v".to_string(), Some(Duration::from_millis(100)));
        store.set("keep", "v".to_string(), Some(Duration::from_secs(60)));
        store.set("short2", "v".to_string(), Some(Duration::from_millis(200)));
        store.set("forever", "v".to_string(), None);
        store.set("short3", "v".to_string(), Some(Duration::from_millis(300)));

        clock.advance(Duration::from_secs(1));
        let removed = store.sweep_expired();

        assert_eq!(removed, vec!["short1", "short2", "short3"]);
        assert_eq!(store.keys(), vec!["keep", "forever"]);
    }

    #[test]
    fn test_sweep_with_nothing_expired() {
        let (mut store, clock) = manual_store(Duration::ZERO);

        store.set("key1", "v".to_string(), Some(Duration::from_secs(60)));
        clock.advance(Duration::from_secs(1));

        assert!(store.sweep_expired().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = EntryStore::new(Duration::ZERO);

        store.set("a", 1, None);
        store.set("b", 2, None);
        store.clear();

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }
}
