use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::yandex::TrackRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub title: String,
    pub owner: String,
    pub kind: u64,
    pub track_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapCounts {
    pub a: usize,
    pub b: usize,
    pub intersection: usize,
    pub union: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMetrics {
    pub jaccard: f64,
    pub overlap: f64,
    pub containment_a: f64,
    pub containment_b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub playlist_a: PlaylistSummary,
    pub playlist_b: PlaylistSummary,
    pub counts: OverlapCounts,
    pub metrics: SimilarityMetrics,
    /// Shared tracks, sorted and capped; see `total_common` for the full count.
    pub common_tracks: Vec<TrackRecord>,
    pub total_common: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedPlaylist {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub kind: u64,
    pub count: usize,
}

/// Every distinct track seen across a set of playlists, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TracksIndex {
    tracks: Vec<TrackRecord>,
}

impl TracksIndex {
    pub(crate) fn from_ordered(tracks: Vec<TrackRecord>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, track_key: &str) -> Option<&TrackRecord> {
        self.tracks.iter().find(|t| t.track_key == track_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.track_key.as_str())
    }
}

impl Serialize for TracksIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tracks.len()))?;
        for track in &self.tracks {
            map.serialize_entry(&track.track_key, track)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistIndex {
    pub playlists: Vec<IndexedPlaylist>,
    pub track_keys_by_playlist: Vec<Vec<String>>,
    pub tracks_index: TracksIndex,
}
