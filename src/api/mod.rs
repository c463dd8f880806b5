/// HTTP surface
pub mod compare;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::comparator::PlaylistComparator;

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<PlaylistComparator>,
}

impl AppState {
    pub fn new(comparator: Arc<PlaylistComparator>) -> Self {
        Self { comparator }
    }
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/compare", post(compare::compare_playlists))
        .route("/index", post(compare::index_playlists))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
