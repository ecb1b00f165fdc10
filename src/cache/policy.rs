//! Cache Policy Module
//!
//! Per-category TTL and capacity settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheCategory;

// == Cache Policy ==
/// TTL and maximum entry count for each category.
///
/// A category missing from `max_entries`, or mapped to `None`, is unbounded.
/// A category missing from `ttl` falls back to the store default.
#[derive(Debug, Clone, Default)]
pub struct CachePolicy {
    pub ttl: HashMap<CacheCategory, Duration>,
    pub max_entries: HashMap<CacheCategory, Option<usize>>,
}

impl CachePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL for a category.
    pub fn with_ttl(mut self, category: CacheCategory, ttl: Duration) -> Self {
        self.ttl.insert(category, ttl);
        self
    }

    /// Sets the capacity for a category (`None` = unbounded).
    pub fn with_max_entries(mut self, category: CacheCategory, max: Option<usize>) -> Self {
        self.max_entries.insert(category, max);
        self
    }

    pub fn ttl(&self, category: CacheCategory) -> Option<Duration> {
        self.ttl.get(&category).copied()
    }

    pub fn max_entries(&self, category: CacheCategory) -> Option<usize> {
        self.max_entries.get(&category).copied().flatten()
    }
}
