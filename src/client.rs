//! Client Module
//!
//! Wires the cache, sweep task, limiter, transport and APIs together.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::api::{AlbumApi, ImageApi, TrackApi};
use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{HttpTransport, Limiter, PageFetcher, Transport};
use crate::models::CachedValue;
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == Fetch Client ==
/// Entry point of the library.
///
/// Must be created inside a tokio runtime: construction starts the expiry
/// sweep, which runs until [`FetchClient::shutdown`] or until the client is
/// dropped.
pub struct FetchClient {
    cache: SharedCache<CachedValue>,
    album: AlbumApi,
    track: TrackApi,
    image: ImageApi,
    sweeper: Option<SweepHandle>,
}

impl FetchClient {
    // == Constructors ==
    /// Creates a client that fetches over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client on top of a custom transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let cache = SharedCache::new(config.cache_policy());
        let fetcher = PageFetcher::new(transport, cache.clone(), Some(Limiter::from_config(config)));
        let image = ImageApi::new(fetcher.clone(), config.image_constants_url.clone());

        // A zero interval disables the sweep.
        let sweeper = (config.sweep_interval > 0).then(|| {
            spawn_sweep_task(cache.clone(), Duration::from_secs(config.sweep_interval))
        });

        info!(
            "Fetch client ready: page_max_entries={:?}, page_ttl={}s, sweep_interval={}s",
            config.page_max_entries, config.page_ttl, config.sweep_interval
        );

        Self {
            album: AlbumApi::new(fetcher.clone(), image.clone()),
            track: TrackApi::new(fetcher, image.clone()),
            image,
            cache,
            sweeper,
        }
    }

    // == Accessors ==
    pub fn album(&self) -> &AlbumApi {
        &self.album
    }

    pub fn track(&self) -> &TrackApi {
        &self.track
    }

    pub fn image(&self) -> &ImageApi {
        &self.image
    }

    /// The shared cache, for tuning TTLs and capacities at runtime.
    pub fn cache(&self) -> &SharedCache<CachedValue> {
        &self.cache
    }

    /// Whether the expiry sweep task is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|sweeper| !sweeper.is_finished())
    }

    // == Shutdown ==
    /// Stops the expiry sweep and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.stop().await;
        }
        info!("Fetch client shut down");
    }
}
