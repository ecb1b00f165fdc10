//! Value type held by the client's cache.

use crate::models::ImageConstants;

// == Cached Value ==
/// Everything the client memoizes, one variant per kind of payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// Raw page HTML, stored under `CacheCategory::Page`
    Html(String),
    /// Image constants, stored under `CacheCategory::Constants`
    ImageConstants(ImageConstants),
}

impl CachedValue {
    pub fn into_html(self) -> Option<String> {
        match self {
            CachedValue::Html(html) => Some(html),
            _ => None,
        }
    }

    pub fn into_image_constants(self) -> Option<ImageConstants> {
        match self {
            CachedValue::ImageConstants(constants) => Some(constants),
            _ => None,
        }
    }
}
