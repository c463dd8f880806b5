pub mod orchestrator;

pub use orchestrator::{MAX_INDEX_PLAYLISTS, MIN_INDEX_PLAYLISTS, PlaylistComparator};
