use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ProviderError;
use crate::yandex::models::{PlaylistRef, PlaylistSnapshot, TrackRecord};

/// Anything that can hand back the raw playlist payload for a reference.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_raw(&self, playlist: &PlaylistRef) -> Result<Value, ProviderError>;
}

/// Talks to the public `handlers/playlist.jsx` endpoint of the web player.
pub struct WebHandlerSource {
    http_client: Client,
    endpoint: String,
}

impl WebHandlerSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(config.provider_url.clone(), config.fetch_timeout)
    }
}

#[async_trait]
impl PlaylistSource for WebHandlerSource {
    async fn fetch_raw(&self, playlist: &PlaylistRef) -> Result<Value, ProviderError> {
        // Random token defeats intermediate HTTP caches.
        let cache_buster = rand::random::<f64>().to_string();
        let kind = playlist.kind.to_string();

        debug!("Requesting playlist {} from {}", playlist, self.endpoint);

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("owner", playlist.owner_login.as_str()),
                ("kinds", kind.as_str()),
                ("r", cache_buster.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Playlist handler failed for {} ({})", playlist, status);
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| ProviderError::InvalidPayload(e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTrack {
    id: Value,
    title: Value,
    artists: Value,
    albums: Value,
    #[serde(rename = "durationMs")]
    duration_ms: Value,
    #[serde(rename = "coverUri")]
    cover_uri: Value,
    link: Value,
}

/// Turn a raw handler payload into a snapshot.
///
/// Items without a numeric id, a numeric first-album id or a title are
/// dropped. Duplicates are kept.
pub fn snapshot_from_payload(
    playlist: &PlaylistRef,
    payload: &Value,
) -> Result<PlaylistSnapshot, ProviderError> {
    let body = payload.get("playlist").unwrap_or(payload);
    let body = body.as_object().ok_or_else(|| {
        ProviderError::InvalidPayload("expected a playlist object".to_string())
    })?;

    let title = body
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Playlist {}", playlist.kind));

    let items = body
        .get("tracks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let tracks: Vec<TrackRecord> = items.iter().filter_map(parse_track).collect();

    if tracks.len() < items.len() {
        debug!(
            "Dropped {} malformed tracks from playlist {}",
            items.len() - tracks.len(),
            playlist
        );
    }

    Ok(PlaylistSnapshot { title, tracks })
}

fn parse_track(item: &Value) -> Option<TrackRecord> {
    // The derived visitor would also fill the struct from a positional array.
    if !item.is_object() {
        return None;
    }
    let raw = RawTrack::deserialize(item).ok()?;

    let track_id = to_int(&raw.id)?;
    let album_id = extract_album_id(&raw.albums)?;
    let title = raw.title.as_str().filter(|t| !t.is_empty())?;

    let mut track = TrackRecord::new(track_id, album_id, title, extract_artists(&raw.artists));
    track.duration_ms = to_int(&raw.duration_ms);
    track.cover_url = extract_cover_url(&raw.cover_uri);
    track.link = raw.link.as_str().map(str::to_string);

    Some(track)
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_u64() || n.is_i64() => n.as_i64(),
        // i64::MAX as f64 is 2^63, so the upper bound is exclusive.
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f.trunc() as i64),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn extract_album_id(albums: &Value) -> Option<i64> {
    let first = albums.as_array()?.first()?;
    to_int(first.get("id")?)
}

fn extract_artists(artists: &Value) -> Vec<String> {
    let Some(artists) = artists.as_array() else {
        return Vec::new();
    };

    artists
        .iter()
        .filter_map(|artist| match artist.get("name")? {
            Value::String(name) if !name.is_empty() => Some(name.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn extract_cover_url(cover_uri: &Value) -> Option<String> {
    let uri = cover_uri.as_str().filter(|u| !u.is_empty())?;
    Some(format!("https://{}", uri.replace("%%", "200x200")))
}
