//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{CacheCategory, CachePolicy};

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds for cached pages (0 = never expire)
    pub page_ttl: u64,
    /// Maximum cached pages, None = unbounded
    pub page_max_entries: Option<usize>,
    /// TTL in seconds for cached service constants (0 = never expire)
    pub constants_ttl: u64,
    /// Maximum cached constants, None = unbounded
    pub constants_max_entries: Option<usize>,
    /// Interval in seconds between expiry sweeps
    pub sweep_interval: u64,
    /// Maximum outbound requests in flight
    pub limiter_max_concurrent: usize,
    /// Minimum milliseconds between two request starts
    pub limiter_min_interval_ms: u64,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Location of a JSON image constants document, None = built-in constants
    pub image_constants_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PAGE_CACHE_TTL_SECS` - Page TTL (default: 300)
    /// - `PAGE_CACHE_MAX_ENTRIES` - Page capacity (default: 10)
    /// - `CONSTANTS_CACHE_TTL_SECS` - Constants TTL (default: 3600)
    /// - `CONSTANTS_CACHE_MAX_ENTRIES` - Constants capacity (default: unbounded)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep frequency (default: 600)
    /// - `LIMITER_MAX_CONCURRENT` - Concurrent requests (default: 5)
    /// - `LIMITER_MIN_INTERVAL_MS` - Spacing between requests (default: 200)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 30)
    /// - `USER_AGENT` - User-Agent header
    /// - `IMAGE_CONSTANTS_URL` - Image constants document (default: built-in)
    ///
    /// Capacities accept `-1` or `unbounded` for no limit.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            page_ttl: parse_var("PAGE_CACHE_TTL_SECS").unwrap_or(defaults.page_ttl),
            page_max_entries: capacity_var("PAGE_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.page_max_entries),
            constants_ttl: parse_var("CONSTANTS_CACHE_TTL_SECS").unwrap_or(defaults.constants_ttl),
            constants_max_entries: capacity_var("CONSTANTS_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.constants_max_entries),
            sweep_interval: parse_var("CACHE_SWEEP_INTERVAL_SECS").unwrap_or(defaults.sweep_interval),
            limiter_max_concurrent: parse_var::<usize>("LIMITER_MAX_CONCURRENT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.limiter_max_concurrent),
            limiter_min_interval_ms: parse_var("LIMITER_MIN_INTERVAL_MS")
                .unwrap_or(defaults.limiter_min_interval_ms),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
            user_agent: env::var("USER_AGENT").unwrap_or(defaults.user_agent),
            image_constants_url: env::var("IMAGE_CONSTANTS_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .or(defaults.image_constants_url),
        }
    }

    // == Cache Policy ==
    /// Initial per-category policy for the cache.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::new()
            .with_ttl(CacheCategory::Page, Duration::from_secs(self.page_ttl))
            .with_max_entries(CacheCategory::Page, self.page_max_entries)
            .with_ttl(CacheCategory::Constants, Duration::from_secs(self.constants_ttl))
            .with_max_entries(CacheCategory::Constants, self.constants_max_entries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_ttl: 300,
            page_max_entries: Some(10),
            constants_ttl: 3600,
            constants_max_entries: None,
            sweep_interval: 600,
            limiter_max_concurrent: 5,
            limiter_min_interval_ms: 200,
            request_timeout: 30,
            user_agent: concat!("album_fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            image_constants_url: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// `Some(None)` for unbounded, `Some(Some(n))` for a limit, `None` if unset or invalid.
fn capacity_var(name: &str) -> Option<Option<usize>> {
    let raw = env::var(name).ok()?;
    parse_capacity(&raw)
}

fn parse_capacity(raw: &str) -> Option<Option<usize>> {
    match raw.trim() {
        "-1" | "unbounded" => Some(None),
        other => other.parse().ok().map(Some),
    }
}
