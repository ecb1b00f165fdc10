//! Integration Tests for the Fetch Client
//!
//! Runs the client against a local axum server standing in for the remote
//! site, and checks what reaches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use album_fetch::models::FormatRef;
use album_fetch::{CacheCategory, Config, FetchClient, FetchError, GetInfoParams};
use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};

const ALBUM_HTML: &str = r#"<html><head>
<script type="application/ld+json">
{"@type":"MusicAlbum","name":"First Album","datePublished":"05 Mar 2021 00:00:00 GMT",
 "image":"https://f4.bcbits.com/img/a0123456789_10.jpg",
 "byArtist":{"name":"The Testers","image":"https://f4.bcbits.com/img/0098765432_10.jpg"},
 "track":{"itemListElement":[
   {"position":1,"item":{"name":"Opening","duration":"P00H03M45S"}},
   {"position":2,"item":{"name":"Closing","duration":"P00H05M00S"}}]}}
</script></head></html>"#;

const TRACK_HTML: &str = r#"<script type="application/ld+json">
{"@type":"MusicRecording","name":"Opening","duration":"P00H03M45S",
 "image":"https://f4.bcbits.com/img/a0123456789_10.jpg",
 "inAlbum":{"name":"First Album"}}
</script>"#;

const CONSTANTS_JSON: &str = r#"{"baseUrl":"https://img.test/img","formats":[
  {"id":9,"name":"art_210","width":210,"height":210},
  {"id":10,"name":"art_1200","width":1200,"height":1200},
  {"id":21,"name":"bio_120","width":120,"height":120}]}"#;

// == Test Site ==

#[derive(Clone, Default)]
struct Hits {
    album: Arc<AtomicUsize>,
    track: Arc<AtomicUsize>,
    constants: Arc<AtomicUsize>,
}

async fn album_page(State(hits): State<Hits>) -> Html<&'static str> {
    hits.album.fetch_add(1, Ordering::SeqCst);
    Html(ALBUM_HTML)
}

async fn track_page(State(hits): State<Hits>) -> Html<&'static str> {
    hits.track.fetch_add(1, Ordering::SeqCst);
    Html(TRACK_HTML)
}

async fn constants(State(hits): State<Hits>) -> &'static str {
    hits.constants.fetch_add(1, Ordering::SeqCst);
    CONSTANTS_JSON
}

async fn spawn_site() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/album/first", get(album_page))
        .route("/track/opening", get(track_page))
        .route("/constants.json", get(constants))
        .route(
            "/album/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        )
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn test_config(base: &str) -> Config {
    Config {
        limiter_min_interval_ms: 0,
        request_timeout: 5,
        image_constants_url: Some(format!("{}/constants.json", base)),
        ..Config::default()
    }
}

// == Album / Track ==

#[tokio::test]
async fn test_album_info_is_fetched_once() {
    let (base, hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    let params = GetInfoParams::new(format!("{}/album/first", base));

    let first = client.album().get_info(&params).await.unwrap();
    let second = client.album().get_info(&params).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "First Album");
    assert_eq!(first.url, params.url);
    assert_eq!(first.release_date.as_deref(), Some("2021-03-05"));
    assert_eq!(first.tracks.len(), 2);
    assert_eq!(
        first.image_url.as_deref(),
        Some("https://img.test/img/a0123456789_9.jpg")
    );
    assert_eq!(
        first.artist.unwrap().image_url.as_deref(),
        Some("https://img.test/img/0098765432_21.jpg")
    );

    assert_eq!(hits.album.load(Ordering::SeqCst), 1);
    assert_eq!(hits.constants.load(Ordering::SeqCst), 1);
    client.shutdown().await;
}

#[tokio::test]
async fn test_track_info_with_named_format() {
    let (base, hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    let params = GetInfoParams {
        album_image_format: Some(FormatRef::from("art_1200")),
        include_raw_data: true,
        ..GetInfoParams::new(format!("{}/track/opening", base))
    };

    let track = client.track().get_info(&params).await.unwrap();

    assert_eq!(track.name, "Opening");
    assert_eq!(track.duration, Some(225.0));
    assert_eq!(track.album.unwrap().name, "First Album");
    assert_eq!(
        track.image_url.as_deref(),
        Some("https://img.test/img/a0123456789_10.jpg")
    );
    assert!(track.raw.is_some());
    assert_eq!(hits.track.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_format_fails_before_fetching_page() {
    let (base, hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    let params = GetInfoParams {
        artist_image_format: Some(FormatRef::Id(999)),
        ..GetInfoParams::new(format!("{}/album/first", base))
    };

    let result = client.album().get_info(&params).await;

    assert!(matches!(result, Err(FetchError::UnknownImageFormat(_))));
    assert_eq!(hits.album.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_error_status_is_not_cached() {
    let (base, _hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    let params = GetInfoParams::new(format!("{}/album/broken", base));

    let result = client.album().get_info(&params).await;

    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    assert!(client.cache().get_keys(CacheCategory::Page).await.is_empty());
}

// == Cache Policy ==

#[tokio::test]
async fn test_page_capacity_evicts_oldest_page() {
    let (base, hits) = spawn_site().await;
    let config = Config {
        page_max_entries: Some(1),
        ..test_config(&base)
    };
    let client = FetchClient::from_config(&config).unwrap();
    let album = GetInfoParams::new(format!("{}/album/first", base));
    let track = GetInfoParams::new(format!("{}/track/opening", base));

    client.album().get_info(&album).await.unwrap();
    client.track().get_info(&track).await.unwrap();
    client.album().get_info(&album).await.unwrap();

    assert_eq!(hits.album.load(Ordering::SeqCst), 2);
    assert_eq!(
        client.cache().get_keys(CacheCategory::Page).await,
        vec![format!("Page.{}/album/first", base)]
    );
    // Constants live in their own partition and survive page evictions.
    assert_eq!(hits.constants.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_zero_page_capacity_disables_page_cache() {
    let (base, hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    client
        .cache()
        .set_max_entries(CacheCategory::Page, Some(0))
        .await;
    let params = GetInfoParams::new(format!("{}/album/first", base));

    client.album().get_info(&params).await.unwrap();
    client.album().get_info(&params).await.unwrap();

    assert_eq!(hits.album.load(Ordering::SeqCst), 2);
    assert_eq!(client.cache().stats().await.rejections, 2);
}

#[tokio::test]
async fn test_expired_page_is_fetched_again() {
    let (base, hits) = spawn_site().await;
    let client = FetchClient::from_config(&test_config(&base)).unwrap();
    client
        .cache()
        .set_ttl(CacheCategory::Page, Duration::from_millis(50))
        .await;
    let params = GetInfoParams::new(format!("{}/album/first", base));

    client.album().get_info(&params).await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(client.cache().sweep_expired().await, 1);
    client.album().get_info(&params).await.unwrap();

    assert_eq!(hits.album.load(Ordering::SeqCst), 2);
}
