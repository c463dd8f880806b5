pub mod client;
pub mod fetcher;
pub mod models;
pub mod parser;

pub use client::{PlaylistSource, WebHandlerSource, snapshot_from_payload};
pub use fetcher::SnapshotFetcher;
pub use models::{PlaylistRef, PlaylistSnapshot, TrackRecord};
pub use parser::parse_playlist_url;
