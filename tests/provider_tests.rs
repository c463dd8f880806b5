//! Tests for the playlist handler client and snapshot fetcher against a mock server.

use playlist_overlap::{
    PlaylistRef, PlaylistSource, ProviderError, SnapshotFetcher, WebHandlerSource,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HANDLER_PATH: &str = "/handlers/playlist.jsx";

fn source_for(server: &MockServer, timeout: Duration) -> WebHandlerSource {
    WebHandlerSource::new(format!("{}{}", server.uri(), HANDLER_PATH), timeout).unwrap()
}

fn playlist_body() -> serde_json::Value {
    json!({
        "playlist": {
            "title": "Road Trip",
            "tracks": [
                {
                    "id": 1,
                    "title": "Song",
                    "artists": [{"name": "Artist"}],
                    "albums": [{"id": 10}],
                    "durationMs": 123000,
                    "coverUri": "avatars.yandex.net/get-music-content/1/cover/%%",
                    "link": "https://music.yandex.ru/track/1"
                },
                {"title": "No id", "albums": [{"id": 20}]}
            ]
        }
    })
}

#[tokio::test]
async fn test_sends_owner_and_kind_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HANDLER_PATH))
        .and(query_param("owner", "user123"))
        .and(query_param("kinds", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server, Duration::from_secs(5));
    let payload = source
        .fetch_raw(&PlaylistRef::new("user123", 42))
        .await
        .unwrap();

    assert_eq!(payload["playlist"]["title"], "Road Trip");

    let requests = server.received_requests().await.unwrap();
    let has_cache_buster = requests[0].url.query_pairs().any(|(k, v)| k == "r" && !v.is_empty());
    assert!(has_cache_buster);
}

#[tokio::test]
async fn test_fetcher_builds_snapshot_and_caches_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HANDLER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = Arc::new(source_for(&server, Duration::from_secs(5)));
    let fetcher = SnapshotFetcher::new(source, Duration::from_secs(600));
    let playlist = PlaylistRef::new("user", 1);

    let snapshot = fetcher.fetch(&playlist).await.unwrap();
    assert_eq!(snapshot.title, "Road Trip");
    assert_eq!(snapshot.tracks.len(), 1);

    let track = &snapshot.tracks[0];
    assert_eq!(track.track_key, "1:10");
    assert_eq!(
        track.cover_url.as_deref(),
        Some("https://avatars.yandex.net/get-music-content/1/cover/200x200")
    );

    let again = fetcher.fetch(&playlist).await.unwrap();
    assert_eq!(snapshot, again);
}

#[tokio::test]
async fn test_non_success_status_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HANDLER_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = source_for(&server, Duration::from_secs(5));
    let result = source.fetch_raw(&PlaylistRef::new("user", 1)).await;

    assert_eq!(result, Err(ProviderError::Status(503)));
}

#[tokio::test]
async fn test_unparseable_body_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HANDLER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let source = source_for(&server, Duration::from_secs(5));
    let result = source.fetch_raw(&PlaylistRef::new("user", 1)).await;

    assert!(matches!(result, Err(ProviderError::InvalidPayload(_))));
}

#[tokio::test]
async fn test_slow_handler_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HANDLER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(playlist_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let source = source_for(&server, Duration::from_millis(100));
    let result = source.fetch_raw(&PlaylistRef::new("user", 1)).await;

    assert_eq!(result, Err(ProviderError::Timeout));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let source = WebHandlerSource::new("http://127.0.0.1:9/handlers/playlist.jsx", Duration::from_secs(2)).unwrap();
    let result = source.fetch_raw(&PlaylistRef::new("user", 1)).await;

    assert!(matches!(result, Err(ProviderError::Transport(_))));
}
