use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::error::ProviderError;
use crate::yandex::client::{PlaylistSource, snapshot_from_payload};
use crate::yandex::models::{PlaylistRef, PlaylistSnapshot};

/// Resolves playlist references to snapshots, consulting the cache first.
///
/// Concurrent misses for the same key are not coalesced: each performs its
/// own remote fetch and the last one to finish owns the cache entry.
pub struct SnapshotFetcher {
    source: Arc<dyn PlaylistSource>,
    cache: TtlCache<Arc<PlaylistSnapshot>>,
    ttl: Duration,
}

impl SnapshotFetcher {
    pub fn new(source: Arc<dyn PlaylistSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(),
            ttl,
        }
    }

    pub async fn fetch(&self, playlist: &PlaylistRef) -> Result<Arc<PlaylistSnapshot>, ProviderError> {
        let cache_key = playlist.cache_key();

        if let Some(snapshot) = self.cache.get(&cache_key) {
            debug!("Cache hit for playlist {}", playlist);
            return Ok(snapshot);
        }

        let payload = self.source.fetch_raw(playlist).await?;
        let snapshot = Arc::new(snapshot_from_payload(playlist, &payload)?);

        info!(
            "Fetched playlist {}: {} ({} tracks)",
            playlist,
            snapshot.title,
            snapshot.tracks.len()
        );

        self.cache.set(cache_key, Arc::clone(&snapshot), self.ttl);

        Ok(snapshot)
    }

    pub fn cached_playlists(&self) -> usize {
        self.cache.len()
    }
}
