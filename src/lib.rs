//! Album Fetch - album and track page client
//!
//! Fetches and parses album and track pages, memoizing pages and service
//! constants in a category-partitioned cache with per-category TTL and
//! capacity.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod parser;
pub mod tasks;

pub use api::GetInfoParams;
pub use cache::{CacheCategory, CachePolicy, SharedCache};
pub use client::FetchClient;
pub use config::Config;
pub use error::{FetchError, Result};
pub use tasks::spawn_sweep_task;
