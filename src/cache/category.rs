//! Cache Category Module
//!
//! The closed set of partitions the cache is split into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the category tag and the caller's key.
///
/// Never appears inside a category tag.
pub const KEY_SEPARATOR: char = '.';

// == Cache Category ==
/// Logical partition of the cache, each with its own TTL and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheCategory {
    /// Fetched page HTML, keyed by URL
    Page,
    /// Service constants such as image formats
    Constants,
}

impl CacheCategory {
    /// Every category, in declaration order.
    pub const ALL: [CacheCategory; 2] = [CacheCategory::Page, CacheCategory::Constants];

    /// The tag used as key prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheCategory::Page => "Page",
            CacheCategory::Constants => "Constants",
        }
    }

    // == Namespacing ==
    /// Builds the store key for `key` in this category.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{}{}", self.as_str(), KEY_SEPARATOR, key)
    }

    /// Checks whether a store key belongs to this category.
    pub fn owns(&self, store_key: &str) -> bool {
        store_key
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with(KEY_SEPARATOR))
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
