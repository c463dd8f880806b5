pub mod api;
pub mod cache;
pub mod comparator;
pub mod config;
pub mod error;
pub mod similarity;
pub mod yandex;

pub use api::{AppState, create_router};
pub use cache::TtlCache;
pub use comparator::PlaylistComparator;
pub use config::Config;
pub use error::{AppError, PlaylistUrlError, ProviderError, Result};
pub use similarity::{ComparisonResult, PlaylistIndex, compare_snapshots, normalize_tracks};
pub use yandex::{
    PlaylistRef, PlaylistSnapshot, PlaylistSource, SnapshotFetcher, TrackRecord, WebHandlerSource,
    parse_playlist_url,
};
