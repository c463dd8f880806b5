use std::collections::HashMap;

use crate::yandex::TrackRecord;

/// Deduplicated, insertion-ordered view of a track list keyed by `track_key`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTracks<'a> {
    tracks: Vec<&'a TrackRecord>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> NormalizedTracks<'a> {
    /// Inserts the track unless its key is already present.
    fn insert_if_absent(&mut self, track: &'a TrackRecord) {
        if self.positions.contains_key(track.track_key.as_str()) {
            return;
        }
        self.positions.insert(&track.track_key, self.tracks.len());
        self.tracks.push(track);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains_key(&self, track_key: &str) -> bool {
        self.positions.contains_key(track_key)
    }

    pub fn get(&self, track_key: &str) -> Option<&'a TrackRecord> {
        self.positions.get(track_key).map(|&i| self.tracks[i])
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tracks.iter().map(|&t| t.track_key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TrackRecord> + '_ {
        self.tracks.iter().copied()
    }
}

/// First occurrence of each `track_key` wins; order follows first appearance.
pub fn normalize_tracks(tracks: &[TrackRecord]) -> NormalizedTracks<'_> {
    let mut normalized = NormalizedTracks::default();
    for track in tracks {
        normalized.insert_if_absent(track);
    }
    normalized
}
