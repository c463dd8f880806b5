use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Reasons a playlist URL can be rejected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistUrlError {
    #[error("Empty URL")]
    Empty,

    #[error("Unsupported URL scheme")]
    UnsupportedScheme,

    #[error("Unsupported host")]
    UnsupportedHost,

    #[error("URL does not match playlist format")]
    InvalidPath,

    #[error("Missing owner login")]
    MissingOwner,

    #[error("Playlist kind must be an integer")]
    InvalidKind,
}

/// Failure while obtaining a playlist snapshot from the upstream handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Timed out while fetching playlist")]
    Timeout,

    #[error("Failed to fetch playlist: {0}")]
    Transport(String),

    #[error("Playlist handler responded with status {0}")]
    Status(u16),

    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playlist #{position}: {source}")]
    InvalidPlaylistUrl {
        position: usize,
        #[source]
        source: PlaylistUrlError,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidPlaylistUrl { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Provider(e) => {
                tracing::error!("Upstream playlist fetch failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch playlist from upstream".to_string(),
                )
            }
            other => {
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
