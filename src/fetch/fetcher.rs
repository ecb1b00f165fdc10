//! Page Fetcher
//!
//! Cache-backed page retrieval: pages are memoized under
//! [`CacheCategory::Page`] keyed by URL, and only misses reach the network.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheCategory, SharedCache};
use crate::error::{FetchError, Result};
use crate::fetch::{Limiter, Transport};
use crate::models::CachedValue;

// == Page Fetcher ==
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    cache: SharedCache<CachedValue>,
    limiter: Option<Limiter>,
}

impl PageFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: SharedCache<CachedValue>,
        limiter: Option<Limiter>,
    ) -> Self {
        Self {
            transport,
            cache,
            limiter,
        }
    }

    // == Fetch Page ==
    /// Returns the HTML at `url`, from cache when possible.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let value = self
            .cache
            .get_or_set(CacheCategory::Page, url, || async {
                self.fetch_uncached(url).await.map(CachedValue::Html)
            })
            .await?;

        value
            .into_html()
            .ok_or_else(|| FetchError::UnexpectedCacheValue {
                category: CacheCategory::Page,
                key: url.to_string(),
            })
    }

    // == Fetch Uncached ==
    /// Fetches `url` through the limiter, bypassing the cache.
    pub async fn fetch_uncached(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");
        match &self.limiter {
            Some(limiter) => limiter.schedule(self.transport.fetch(url)).await,
            None => self.transport.fetch(url).await,
        }
    }

    pub fn cache(&self) -> &SharedCache<CachedValue> {
        &self.cache
    }
}
