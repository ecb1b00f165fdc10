//! Track API
//!
//! Fetches (through the page cache) and parses track pages.

use tracing::info;

use crate::api::album::parse_options;
use crate::api::{GetInfoParams, ImageApi};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::Track;
use crate::parser;

#[derive(Clone)]
pub struct TrackApi {
    fetcher: PageFetcher,
    images: ImageApi,
}

impl TrackApi {
    pub fn new(fetcher: PageFetcher, images: ImageApi) -> Self {
        Self { fetcher, images }
    }

    // == Get Info ==
    /// Returns the track described by the page at `params.url`.
    pub async fn get_info(&self, params: &GetInfoParams) -> Result<Track> {
        let opts = parse_options(&self.images, params).await?;
        let html = self.fetcher.fetch_page(&params.url).await?;
        let track = parser::parse_track(&html, &params.url, &opts)?;

        info!(url = %params.url, name = %track.name, "track parsed");
        Ok(track)
    }
}
