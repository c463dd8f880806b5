pub mod engine;
pub mod normalizer;
pub mod report;

pub use engine::{DEFAULT_COMMON_LIMIT, build_index, compare_snapshots, safe_ratio};
pub use normalizer::{NormalizedTracks, normalize_tracks};
pub use report::{
    ComparisonResult, IndexedPlaylist, OverlapCounts, PlaylistIndex, PlaylistSummary,
    SimilarityMetrics, TracksIndex,
};
