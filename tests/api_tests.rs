/// HTTP request/response tests against the router with an in-memory source
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use playlist_overlap::{
    AppState, Config, PlaylistComparator, PlaylistRef, PlaylistSource, ProviderError,
    create_router,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::util::ServiceExt;

struct StaticSource {
    calls: AtomicUsize,
}

#[async_trait]
impl PlaylistSource for StaticSource {
    async fn fetch_raw(&self, playlist: &PlaylistRef) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match playlist.kind {
            1 => Ok(json!({"playlist": {"title": "Morning", "tracks": [
                {"id": 1, "title": "one", "albums": [{"id": 10}], "artists": [{"name": "A"}]},
                {"id": 2, "title": "two", "albums": [{"id": 20}], "artists": [{"name": "B"}]}
            ]}})),
            2 => Ok(json!({"playlist": {"title": "Evening", "tracks": [
                {"id": 2, "title": "two", "albums": [{"id": 20}], "artists": [{"name": "B"}]},
                {"id": 3, "title": "three", "albums": [{"id": 30}], "artists": [{"name": "C"}]}
            ]}})),
            3 => Ok(json!({"playlist": {"title": "Empty", "tracks": []}})),
            _ => Err(ProviderError::Timeout),
        }
    }
}

fn create_test_app() -> (Router, Arc<StaticSource>) {
    let source = Arc::new(StaticSource {
        calls: AtomicUsize::new(0),
    });
    let comparator = PlaylistComparator::new(source.clone(), &Config::default());
    (create_router(AppState::new(Arc::new(comparator))), source)
}

fn url(owner: &str, kind: u64) -> String {
    format!("https://music.yandex.ru/users/{}/playlists/{}", owner, kind)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_compare_partial_overlap() {
    let (app, source) = create_test_app();
    let (status, body) = post_json(
        app,
        "/compare",
        json!({"playlist_a": url("alice", 1), "playlist_b": url("bob", 2)}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"], json!({"a": 2, "b": 2, "intersection": 1, "union": 3}));
    let jaccard = body["metrics"]["jaccard"].as_f64().unwrap();
    assert!((jaccard - 0.333333).abs() < 1e-9, "jaccard was {}", jaccard);
    assert_eq!(body["metrics"]["containment_a"], 0.5);
    assert_eq!(body["total_common"], 1);
    assert_eq!(body["common_tracks"][0]["track_key"], "2:20");
    assert_eq!(body["playlist_a"]["title"], "Morning");
    assert_eq!(body["playlist_b"]["owner"], "bob");
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_compare_empty_playlists() {
    let (app, _) = create_test_app();
    let (status, body) = post_json(
        app,
        "/compare",
        json!({"playlist_a": url("alice", 3), "playlist_b": url("bob", 3)}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["metrics"],
        json!({"jaccard": 0.0, "overlap": 0.0, "containment_a": 0.0, "containment_b": 0.0})
    );
    assert_eq!(body["common_tracks"], json!([]));
}

#[tokio::test]
async fn test_compare_respects_limit() {
    let (app, _) = create_test_app();
    let (status, body) = post_json(
        app,
        "/compare",
        json!({"playlist_a": url("alice", 1), "playlist_b": url("alice", 1), "limit": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_common"], 2);
    assert_eq!(body["common_tracks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_compare_bad_url_is_client_error() {
    let (app, source) = create_test_app();
    let (status, body) = post_json(
        app,
        "/compare",
        json!({
            "playlist_a": url("alice", 1),
            "playlist_b": "https://music.yandex.ru/users/bob/playlists/abc"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Playlist #2: Playlist kind must be an integer");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_compare_provider_failure_is_gateway_error() {
    let (app, _) = create_test_app();
    let (status, body) = post_json(
        app,
        "/compare",
        json!({"playlist_a": url("alice", 1), "playlist_b": url("bob", 42)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to fetch playlist from upstream");
}

#[tokio::test]
async fn test_index() {
    let (app, _) = create_test_app();
    let (status, body) = post_json(
        app,
        "/index",
        json!({"playlist_urls": [url("alice", 1), url("bob", 2)]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playlists"][0]["id"], "p0");
    assert_eq!(body["playlists"][1]["count"], 2);
    assert_eq!(body["track_keys_by_playlist"], json!([["1:10", "2:20"], ["2:20", "3:30"]]));
    assert_eq!(body["tracks_index"].as_object().unwrap().len(), 3);
    assert_eq!(body["tracks_index"]["2:20"]["title"], "two");
}

#[tokio::test]
async fn test_index_requires_two_urls() {
    let (app, _) = create_test_app();
    let (status, _) = post_json(app, "/index", json!({"playlist_urls": [url("alice", 1)]})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_missing_field_is_json_bad_request() {
    let (app, source) = create_test_app();
    let (status, body) = post_json(app, "/compare", json!({"playlist_a": "x"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("playlist_b"),
        "unexpected error body: {}",
        body
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_index_malformed_body_is_json_bad_request() {
    let (app, _) = create_test_app();
    let (status, body) = post_json(app, "/index", json!({"playlist_urls": "not a list"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
