//! Fetch-through orchestration: cache read, upstream fetch on miss, cache refresh.

use crate::cache::{CacheStats, CacheStore, CachedCollection};
use crate::types::{ItemRecord, PlaylistVideos};
use crate::upstream::PlaylistSource;
use crate::Result;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Serves playlist lookups, consulting the cache before the upstream.
///
/// Cache failures never fail a lookup; they only decide whether the answer
/// came from disk or from a live fetch. Upstream failures are returned.
#[derive(Clone)]
pub struct PlaylistService {
    cache: Arc<CacheStore>,
    source: Arc<dyn PlaylistSource>,
}

impl PlaylistService {
    pub fn new(cache: Arc<CacheStore>, source: Arc<dyn PlaylistSource>) -> Self {
        Self { cache, source }
    }

    pub async fn videos(&self, identifier: &str) -> Result<PlaylistVideos> {
        if let Some(hit) = self.read_cache(identifier).await {
            debug!(playlist = identifier, "served from cache");
            return Ok(PlaylistVideos::new(hit.items, unix_seconds(hit.written_at)));
        }

        let items = self.source.fetch_collection(identifier).await?;
        debug!(
            playlist = identifier,
            source = self.source.name(),
            items = items.len(),
            "fetched from upstream"
        );

        let written_at = self.write_cache(identifier, &items).await;
        Ok(PlaylistVideos::new(
            items,
            written_at.map(unix_seconds).unwrap_or(0),
        ))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn read_cache(&self, identifier: &str) -> Option<CachedCollection> {
        let cache = self.cache.clone();
        let id = identifier.to_string();
        match tokio::task::spawn_blocking(move || cache.read(&id)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(playlist = identifier, error = %e, "cache read task failed");
                None
            }
        }
    }

    /// New write time, if one was recorded.
    async fn write_cache(&self, identifier: &str, items: &[ItemRecord]) -> Option<SystemTime> {
        let cache = self.cache.clone();
        let id = identifier.to_string();
        let items = items.to_vec();
        match tokio::task::spawn_blocking(move || cache.write(&id, &items)).await {
            Ok(Ok(written_at)) => written_at,
            Ok(Err(e)) => {
                warn!(playlist = identifier, error = %e, "cache write failed, serving uncached result");
                None
            }
            Err(e) => {
                warn!(playlist = identifier, error = %e, "cache write task failed");
                None
            }
        }
    }
}

fn unix_seconds(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
