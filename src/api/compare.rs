/// Comparison routes
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::api::AppState;
use crate::error::Result;
use crate::similarity::{ComparisonResult, PlaylistIndex};

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub playlist_a: String,
    pub playlist_b: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct IndexRequest {
    pub playlist_urls: Vec<String>,
}

/// POST /compare
/// Similarity of two playlists plus their shared tracks
pub async fn compare_playlists(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>> {
    let Json(req) = payload?;
    let result = app_state
        .comparator
        .compare_urls(&req.playlist_a, &req.playlist_b, req.limit)
        .await?;
    Ok(Json(result))
}

/// POST /index
/// Per-playlist track keys and a shared index of every track
pub async fn index_playlists(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<IndexRequest>, JsonRejection>,
) -> Result<Json<PlaylistIndex>> {
    let Json(req) = payload?;
    let index = app_state.comparator.index_urls(&req.playlist_urls).await?;
    Ok(Json(index))
}
