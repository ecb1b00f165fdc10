//! Album API
//!
//! Fetches (through the page cache) and parses album pages.

use tracing::info;

use crate::api::{GetInfoParams, ImageApi, DEFAULT_ALBUM_IMAGE_FORMAT, DEFAULT_ARTIST_IMAGE_FORMAT};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::Album;
use crate::parser::{self, ParseOptions};

#[derive(Clone)]
pub struct AlbumApi {
    fetcher: PageFetcher,
    images: ImageApi,
}

impl AlbumApi {
    pub fn new(fetcher: PageFetcher, images: ImageApi) -> Self {
        Self { fetcher, images }
    }

    // == Get Info ==
    /// Returns the album described by the page at `params.url`.
    pub async fn get_info(&self, params: &GetInfoParams) -> Result<Album> {
        let opts = parse_options(&self.images, params).await?;
        let html = self.fetcher.fetch_page(&params.url).await?;
        let album = parser::parse_album(&html, &params.url, &opts)?;

        info!(url = %params.url, tracks = album.tracks.len(), "album parsed");
        Ok(album)
    }
}

/// Resolves image constants and formats for a request.
pub(crate) async fn parse_options(images: &ImageApi, params: &GetInfoParams) -> Result<ParseOptions> {
    let constants = images.get_constants().await?;
    Ok(ParseOptions {
        image_base_url: constants.base_url,
        album_image_format: Some(
            images
                .get_format(params.album_image_format.as_ref(), DEFAULT_ALBUM_IMAGE_FORMAT)
                .await?,
        ),
        artist_image_format: Some(
            images
                .get_format(params.artist_image_format.as_ref(), DEFAULT_ARTIST_IMAGE_FORMAT)
                .await?,
        ),
        include_raw_data: params.include_raw_data,
    })
}
