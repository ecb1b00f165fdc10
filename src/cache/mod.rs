//! Cache Module
//!
//! Category-partitioned in-memory cache with per-category TTL and capacity,
//! built on a generic TTL key/value store.

mod category;
mod clock;
mod entry;
mod order;
mod partitioned;
mod policy;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use category::{CacheCategory, KEY_SEPARATOR};
pub use clock::{Clock, ClockRef, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use partitioned::PartitionedCache;
pub use policy::CachePolicy;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::EntryStore;
