//! Image API
//!
//! Image constants (memoized under [`CacheCategory::Constants`]) and image
//! format resolution.

use tracing::debug;

use crate::cache::CacheCategory;
use crate::error::{FetchError, Result};
use crate::fetch::PageFetcher;
use crate::models::{CachedValue, FormatRef, ImageConstants, ImageFormat};

/// Cache key of the image constants within the Constants category.
pub const IMAGE_CONSTANTS_KEY: &str = "image";

#[derive(Clone)]
pub struct ImageApi {
    fetcher: PageFetcher,
    constants_url: Option<String>,
}

impl ImageApi {
    /// # Arguments
    /// * `constants_url` - JSON constants document, or None for the built-in constants
    pub fn new(fetcher: PageFetcher, constants_url: Option<String>) -> Self {
        Self {
            fetcher,
            constants_url,
        }
    }

    // == Get Constants ==
    /// Returns the image constants, fetching them at most once per TTL.
    pub async fn get_constants(&self) -> Result<ImageConstants> {
        let value = self
            .fetcher
            .cache()
            .get_or_set(CacheCategory::Constants, IMAGE_CONSTANTS_KEY, || async {
                let constants = match &self.constants_url {
                    Some(url) => {
                        let body = self.fetcher.fetch_uncached(url).await?;
                        serde_json::from_str::<ImageConstants>(&body)?
                    }
                    None => ImageConstants::builtin(),
                };
                debug!(formats = constants.formats.len(), "image constants loaded");
                Ok::<_, FetchError>(CachedValue::ImageConstants(constants))
            })
            .await?;

        value
            .into_image_constants()
            .ok_or_else(|| FetchError::UnexpectedCacheValue {
                category: CacheCategory::Constants,
                key: IMAGE_CONSTANTS_KEY.to_string(),
            })
    }

    // == Get Format ==
    /// Resolves a requested format, or `default_id` when none is requested.
    pub async fn get_format(
        &self,
        requested: Option<&FormatRef>,
        default_id: u32,
    ) -> Result<ImageFormat> {
        if let Some(FormatRef::Format(format)) = requested {
            return Ok(format.clone());
        }

        let constants = self.get_constants().await?;
        let found = match requested {
            Some(FormatRef::Id(id)) => constants.find_by_id(*id),
            Some(FormatRef::Name(name)) => constants.find_by_name(name),
            Some(FormatRef::Format(_)) | None => constants.find_by_id(default_id),
        };

        found.cloned().ok_or_else(|| {
            let wanted = requested
                .map(ToString::to_string)
                .unwrap_or_else(|| default_id.to_string());
            FetchError::UnknownImageFormat(wanted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::cache::{CachePolicy, SharedCache};
    use crate::fetch::Transport;

    struct StaticTransport(&'static str);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn image_api(body: &'static str, url: Option<&str>) -> ImageApi {
        let fetcher = PageFetcher::new(
            Arc::new(StaticTransport(body)),
            SharedCache::new(CachePolicy::new()),
            None,
        );
        ImageApi::new(fetcher, url.map(str::to_string))
    }

    #[tokio::test]
    async fn test_builtin_constants_are_cached() {
        let api = image_api("", None);

        let constants = api.get_constants().await.unwrap();
        assert_eq!(constants, ImageConstants::builtin());

        let keys = api.fetcher.cache().get_keys(CacheCategory::Constants).await;
        assert_eq!(keys, vec!["Constants.image"]);
    }

    #[tokio::test]
    async fn test_fetched_constants() {
        let api = image_api(
            r#"{"baseUrl":"https://img.test","formats":[{"id":7,"name":"small"}]}"#,
            Some("https://img.test/constants.json"),
        );

        let format = api.get_format(Some(&FormatRef::from("small")), 0).await.unwrap();
        assert_eq!(format.id, 7);
        assert_eq!(api.get_constants().await.unwrap().base_url, "https://img.test");
    }

    #[tokio::test]
    async fn test_get_format_default_and_unknown() {
        let api = image_api("", None);

        assert_eq!(api.get_format(None, 9).await.unwrap().id, 9);

        let err = api.get_format(Some(&FormatRef::Id(12345)), 9).await.unwrap_err();
        assert!(matches!(err, FetchError::UnknownImageFormat(ref wanted) if wanted == "12345"));
    }

    #[tokio::test]
    async fn test_explicit_format_skips_constants() {
        let api = image_api("", None);
        let custom = ImageFormat {
            id: 77,
            name: "custom".to_string(),
            width: None,
            height: None,
        };

        let format = api.get_format(Some(&FormatRef::Format(custom.clone())), 9).await.unwrap();
        assert_eq!(format, custom);
        assert!(api.fetcher.cache().is_empty().await);
    }
}
