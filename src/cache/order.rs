//! Insertion Order Module
//!
//! Tracks the order in which keys were first created in the store.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Remembers key creation order for oldest-first eviction.
///
/// Each key gets a monotonically increasing sequence number:
/// - `by_seq` walks keys oldest to newest
/// - `seq_of` finds a key's slot for removal in O(log n)
///
/// Overwriting an existing key does not move it.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    by_seq: BTreeMap<u64, String>,
    seq_of: HashMap<String, u64>,
    next_seq: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends a newly created key. Already tracked keys keep their place.
    pub fn push(&mut self, key: &str) {
        if self.seq_of.contains_key(key) {
            return;
        }
        self.by_seq.insert(self.next_seq, key.to_string());
        self.seq_of.insert(key.to_string(), self.next_seq);
        self.next_seq += 1;
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.seq_of.remove(key) {
            self.by_seq.remove(&seq);
        }
    }

    // == Iterate ==
    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.by_seq.values()
    }

    pub fn clear(&mut self) {
        self.by_seq.clear();
        self.seq_of.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seq.is_empty()
    }
}
