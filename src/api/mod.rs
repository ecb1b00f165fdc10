//! API Module
//!
//! Typed entry points for album and track pages.
//!
//! # APIs
//! - `AlbumApi::get_info` - Parse an album page
//! - `TrackApi::get_info` - Parse a track page
//! - `ImageApi` - Image constants and format resolution

pub mod album;
pub mod image;
pub mod track;

pub use album::AlbumApi;
pub use image::ImageApi;
pub use track::TrackApi;

use crate::models::FormatRef;

/// Image format used for album art when none is requested.
pub const DEFAULT_ALBUM_IMAGE_FORMAT: u32 = 9;
/// Image format used for artist pictures when none is requested.
pub const DEFAULT_ARTIST_IMAGE_FORMAT: u32 = 21;

// == Get Info Params ==
/// Request for an album or track page.
#[derive(Debug, Clone, Default)]
pub struct GetInfoParams {
    pub url: String,
    pub album_image_format: Option<FormatRef>,
    pub artist_image_format: Option<FormatRef>,
    pub include_raw_data: bool,
}

impl GetInfoParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}
