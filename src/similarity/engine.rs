use std::collections::HashSet;

use crate::similarity::normalizer::{NormalizedTracks, normalize_tracks};
use crate::similarity::report::{
    ComparisonResult, IndexedPlaylist, OverlapCounts, PlaylistIndex, PlaylistSummary,
    SimilarityMetrics, TracksIndex,
};
use crate::yandex::{PlaylistRef, PlaylistSnapshot, TrackRecord};

pub const DEFAULT_COMMON_LIMIT: usize = 500;

/// Division that yields 0.0 for an empty denominator, rounded to 6 decimals.
pub fn safe_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let ratio = numerator as f64 / denominator as f64;
    (ratio * 1_000_000.0).round() / 1_000_000.0
}

/// Sort key for shared tracks: lowercased first artist, then lowercased title.
fn sort_key(track: &TrackRecord) -> (String, String) {
    (
        track.primary_artist().to_lowercase(),
        track.title.to_lowercase(),
    )
}

fn summarize(playlist: &PlaylistRef, snapshot: &PlaylistSnapshot, track_count: usize) -> PlaylistSummary {
    PlaylistSummary {
        title: snapshot.title.clone(),
        owner: playlist.owner_login.clone(),
        kind: playlist.kind,
        track_count,
    }
}

/// Compare two fetched playlists by exact track identity.
///
/// When both sides carry a shared track, the record from playlist A is the
/// one reported.
pub fn compare_snapshots(
    ref_a: &PlaylistRef,
    snapshot_a: &PlaylistSnapshot,
    ref_b: &PlaylistRef,
    snapshot_b: &PlaylistSnapshot,
    limit: usize,
) -> ComparisonResult {
    let tracks_a = normalize_tracks(&snapshot_a.tracks);
    let tracks_b = normalize_tracks(&snapshot_b.tracks);

    let common: Vec<&TrackRecord> = tracks_a
        .iter()
        .filter(|track| tracks_b.contains_key(&track.track_key))
        .collect();

    let counts = overlap_counts(&tracks_a, &tracks_b, common.len());
    let metrics = SimilarityMetrics {
        jaccard: safe_ratio(counts.intersection, counts.union),
        overlap: safe_ratio(counts.intersection, counts.a.min(counts.b)),
        containment_a: safe_ratio(counts.intersection, counts.a),
        containment_b: safe_ratio(counts.intersection, counts.b),
    };

    let mut keyed: Vec<((String, String), &TrackRecord)> =
        common.into_iter().map(|t| (sort_key(t), t)).collect();
    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));

    let total_common = keyed.len();
    let common_tracks = keyed
        .into_iter()
        .take(limit)
        .map(|(_, track)| track.clone())
        .collect();

    ComparisonResult {
        playlist_a: summarize(ref_a, snapshot_a, counts.a),
        playlist_b: summarize(ref_b, snapshot_b, counts.b),
        counts,
        metrics,
        common_tracks,
        total_common,
    }
}

fn overlap_counts(a: &NormalizedTracks<'_>, b: &NormalizedTracks<'_>, intersection: usize) -> OverlapCounts {
    OverlapCounts {
        a: a.len(),
        b: b.len(),
        intersection,
        union: a.len() + b.len() - intersection,
    }
}

/// Per-playlist key lists plus a shared index of every distinct track.
///
/// Each playlist is listed as `p{index}` in input order, and the index keeps
/// the first record seen for a key across playlists in that same order.
pub fn build_index(playlists: &[(PlaylistRef, &PlaylistSnapshot)]) -> PlaylistIndex {
    let mut summaries = Vec::with_capacity(playlists.len());
    let mut track_keys_by_playlist = Vec::with_capacity(playlists.len());
    let mut seen: HashSet<&str> = HashSet::new();
    let mut indexed: Vec<TrackRecord> = Vec::new();

    for (index, (playlist, snapshot)) in playlists.iter().enumerate() {
        let unique = normalize_tracks(&snapshot.tracks);

        for track in unique.iter() {
            if seen.insert(track.track_key.as_str()) {
                indexed.push(track.clone());
            }
        }

        track_keys_by_playlist.push(unique.keys().map(str::to_string).collect());
        summaries.push(IndexedPlaylist {
            id: format!("p{}", index),
            title: snapshot.title.clone(),
            owner: playlist.owner_login.clone(),
            kind: playlist.kind,
            count: unique.len(),
        });
    }

    PlaylistIndex {
        playlists: summaries,
        track_keys_by_playlist,
        tracks_index: TracksIndex::from_ordered(indexed),
    }
}
