//! Page Parser
//!
//! Extracts album and track data from the `application/ld+json` block that
//! album and track pages embed.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FetchError, Result};
use crate::models::{Album, AlbumRef, Artist, ImageFormat, Track};

static LD_JSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("Invalid ld+json pattern regex")
});

/// `P00H03M45S`, `PT3M45S`, `PT45.5S`...
static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT?(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?$")
        .expect("Invalid duration pattern regex")
});

/// Image id in a hosted image URL, e.g. `a0123456789` in `.../img/a0123456789_10.jpg`.
static IMAGE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/img/(a?\d+)_\d+\.\w+").expect("Invalid image id pattern regex"));

// == Parse Options ==
/// What to resolve while parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub image_base_url: String,
    pub album_image_format: Option<ImageFormat>,
    pub artist_image_format: Option<ImageFormat>,
    pub include_raw_data: bool,
}

// == Embedded Data ==
#[derive(Debug, Deserialize)]
struct LdAlbum {
    name: String,
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "byArtist")]
    by_artist: Option<LdArtist>,
    #[serde(rename = "datePublished")]
    date_published: Option<String>,
    description: Option<String>,
    image: Option<String>,
    #[serde(rename = "numTracks")]
    num_tracks: Option<usize>,
    track: Option<LdItemList>,
}

#[derive(Debug, Deserialize)]
struct LdTrack {
    name: String,
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "byArtist")]
    by_artist: Option<LdArtist>,
    #[serde(rename = "inAlbum")]
    in_album: Option<LdAlbumRef>,
    description: Option<String>,
    duration: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LdArtist {
    name: String,
    #[serde(rename = "@id")]
    id: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LdAlbumRef {
    name: String,
    #[serde(rename = "@id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LdItemList {
    #[serde(rename = "itemListElement", default)]
    items: Vec<LdListItem>,
}

#[derive(Debug, Deserialize)]
struct LdListItem {
    position: Option<u32>,
    item: LdTrack,
}

// == Album ==
/// Parses an album page fetched from `url`.
pub fn parse_album(html: &str, url: &str, opts: &ParseOptions) -> Result<Album> {
    let raw = extract_ld_json(html)?;
    let ld: LdAlbum = serde_json::from_value(raw.clone())?;

    let tracks: Vec<Track> = ld
        .track
        .map(|list| list.items)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| Track {
            position: entry.position,
            ..track_from_ld(entry.item, None)
        })
        .collect();

    Ok(Album {
        url: ld.id.unwrap_or_else(|| url.to_string()),
        name: ld.name,
        artist: ld.by_artist.map(|artist| artist_from_ld(artist, opts)),
        release_date: ld.date_published.as_deref().map(normalize_date),
        description: ld.description,
        image_url: resolve_image(ld.image.as_deref(), opts.album_image_format.as_ref(), opts),
        num_tracks: ld.num_tracks.unwrap_or(tracks.len()),
        tracks,
        raw: opts.include_raw_data.then_some(raw),
    })
}

// == Track ==
/// Parses a track page fetched from `url`.
pub fn parse_track(html: &str, url: &str, opts: &ParseOptions) -> Result<Track> {
    let raw = extract_ld_json(html)?;
    let mut ld: LdTrack = serde_json::from_value(raw.clone())?;

    let image_url = resolve_image(ld.image.as_deref(), opts.album_image_format.as_ref(), opts);
    let artist = ld.by_artist.take().map(|artist| artist_from_ld(artist, opts));

    let mut track = track_from_ld(ld, Some(url));
    track.image_url = image_url;
    track.artist = artist;
    track.raw = opts.include_raw_data.then_some(raw);
    Ok(track)
}

fn track_from_ld(ld: LdTrack, fallback_url: Option<&str>) -> Track {
    Track {
        name: ld.name,
        url: ld.id.or_else(|| fallback_url.map(str::to_string)),
        duration: ld.duration.as_deref().and_then(parse_duration),
        description: ld.description,
        album: ld.in_album.map(|album| AlbumRef {
            name: album.name,
            url: album.id,
        }),
        ..Track::default()
    }
}

fn artist_from_ld(ld: LdArtist, opts: &ParseOptions) -> Artist {
    Artist {
        name: ld.name,
        url: ld.id,
        image_url: resolve_image(ld.image.as_deref(), opts.artist_image_format.as_ref(), opts),
    }
}

// == Helpers ==
/// Returns the first ld+json block of the page.
pub fn extract_ld_json(html: &str) -> Result<Value> {
    let captures = LD_JSON_PATTERN
        .captures(html)
        .ok_or_else(|| FetchError::Parse("page has no ld+json block".to_string()))?;
    Ok(serde_json::from_str(captures[1].trim())?)
}

/// Converts an ISO-8601 duration to seconds.
pub fn parse_duration(iso: &str) -> Option<f64> {
    let captures = DURATION_PATTERN.captures(iso.trim())?;
    if (1..=3).all(|i| captures.get(i).is_none()) {
        return None;
    }
    let part = |i: usize| -> f64 {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Some(part(1) * 3600.0 + part(2) * 60.0 + part(3))
}

/// Extracts the image id from a hosted image URL.
pub fn image_id(image_url: &str) -> Option<&str> {
    IMAGE_ID_PATTERN
        .captures(image_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Builds the URL of `image_id` rendered in `format`.
pub fn image_url(base_url: &str, image_id: &str, format: &ImageFormat) -> String {
    format!("{}/{}_{}.jpg", base_url.trim_end_matches('/'), image_id, format.id)
}

/// Re-targets `original` at `format` when both are known, else keeps it.
fn resolve_image(
    original: Option<&str>,
    format: Option<&ImageFormat>,
    opts: &ParseOptions,
) -> Option<String> {
    let original = original?;
    match (format, image_id(original)) {
        (Some(format), Some(id)) if !opts.image_base_url.is_empty() => {
            Some(image_url(&opts.image_base_url, id, format))
        }
        _ => Some(original.to_string()),
    }
}

/// `20 Jan 2020 00:00:00 GMT` becomes `2020-01-20`; anything else is kept as is.
fn normalize_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw.trim(), "%d %b %Y %H:%M:%S GMT")
        .map(|dt| dt.date().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
