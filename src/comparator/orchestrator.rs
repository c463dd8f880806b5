use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::similarity::{ComparisonResult, PlaylistIndex, build_index, compare_snapshots};
use crate::yandex::{PlaylistRef, PlaylistSource, SnapshotFetcher, WebHandlerSource, parse_playlist_url};

pub const MIN_INDEX_PLAYLISTS: usize = 2;
pub const MAX_INDEX_PLAYLISTS: usize = 20;

/// Parses playlist URLs, fetches their snapshots concurrently and compares them.
pub struct PlaylistComparator {
    fetcher: SnapshotFetcher,
    default_limit: usize,
}

impl PlaylistComparator {
    pub fn new(source: Arc<dyn PlaylistSource>, config: &Config) -> Self {
        Self {
            fetcher: SnapshotFetcher::new(source, config.cache_ttl),
            default_limit: config.common_tracks_limit,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let source = WebHandlerSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), config))
    }

    pub fn fetcher(&self) -> &SnapshotFetcher {
        &self.fetcher
    }

    /// Both URLs are validated before any request goes out.
    pub async fn compare_urls(
        &self,
        url_a: &str,
        url_b: &str,
        limit: Option<usize>,
    ) -> Result<ComparisonResult> {
        let ref_a = parse_at(1, url_a)?;
        let ref_b = parse_at(2, url_b)?;
        self.compare(&ref_a, &ref_b, limit).await
    }

    pub async fn compare(
        &self,
        ref_a: &PlaylistRef,
        ref_b: &PlaylistRef,
        limit: Option<usize>,
    ) -> Result<ComparisonResult> {
        let (snapshot_a, snapshot_b) =
            tokio::try_join!(self.fetcher.fetch(ref_a), self.fetcher.fetch(ref_b))?;

        let result = compare_snapshots(
            ref_a,
            &snapshot_a,
            ref_b,
            &snapshot_b,
            limit.unwrap_or(self.default_limit),
        );

        info!(
            "Compared {} with {}: {}/{} shared (jaccard {:.3})",
            ref_a,
            ref_b,
            result.counts.intersection,
            result.counts.union,
            result.metrics.jaccard
        );

        Ok(result)
    }

    pub async fn index_urls(&self, urls: &[String]) -> Result<PlaylistIndex> {
        if !(MIN_INDEX_PLAYLISTS..=MAX_INDEX_PLAYLISTS).contains(&urls.len()) {
            return Err(AppError::BadRequest(format!(
                "Expected between {} and {} playlist URLs, got {}",
                MIN_INDEX_PLAYLISTS,
                MAX_INDEX_PLAYLISTS,
                urls.len()
            )));
        }

        let refs = urls
            .iter()
            .enumerate()
            .map(|(i, url)| parse_at(i + 1, url))
            .collect::<Result<Vec<_>>>()?;

        let snapshots = try_join_all(refs.iter().map(|r| self.fetcher.fetch(r))).await?;

        let playlists: Vec<_> = refs
            .into_iter()
            .zip(snapshots.iter().map(|s| s.as_ref()))
            .collect();

        info!("Indexed {} playlists", playlists.len());

        Ok(build_index(&playlists))
    }
}

fn parse_at(position: usize, url: &str) -> Result<PlaylistRef> {
    parse_playlist_url(url).map_err(|source| AppError::InvalidPlaylistUrl { position, source })
}
