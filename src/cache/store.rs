//! Fetch-through cache store.

use super::backend::CacheBackend;
use super::key::{CacheKey, KeyDeriver};
use super::policy::{Clock, StalenessPolicy, SystemClock, DEFAULT_TTL};
use crate::types::ItemRecord;
use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub enabled: bool,
    pub salt: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            enabled: true,
            salt: None,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub skipped_writes: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    skipped_writes: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            skipped_writes: self.skipped_writes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// A fresh cached collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedCollection {
    pub items: Vec<ItemRecord>,
    pub written_at: SystemTime,
}

/// Keyed, TTL-checked storage of playlist item sequences.
///
/// Reads never fail: absent, stale, corrupt or unreadable entries are all a
/// miss. Writes are skipped while a fresh readable entry exists, so the
/// first writer inside a freshness window wins.
pub struct CacheStore {
    config: CacheConfig,
    keys: KeyDeriver,
    policy: StalenessPolicy,
    backend: Box<dyn CacheBackend>,
    clock: Arc<dyn Clock>,
    stats: AtomicStats,
}

impl CacheStore {
    pub fn new(config: CacheConfig, backend: Box<dyn CacheBackend>) -> Self {
        Self::with_clock(config, backend, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: CacheConfig,
        backend: Box<dyn CacheBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let keys = match config.salt {
            Some(ref s) => KeyDeriver::new().with_salt(s.clone()),
            None => KeyDeriver::new(),
        };
        let policy = StalenessPolicy::new(config.ttl);
        Self {
            config,
            keys,
            policy,
            backend,
            clock,
            stats: AtomicStats::default(),
        }
    }

    pub fn key_for(&self, identifier: &str) -> CacheKey {
        self.keys.derive(identifier)
    }

    pub fn read(&self, identifier: &str) -> Option<CachedCollection> {
        if !self.config.enabled {
            return None;
        }
        let key = self.key_for(identifier);
        match self.lookup(&key) {
            Some(hit) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, items = hit.items.len(), "cache hit");
                Some(hit)
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Persist `items` for `identifier` unless a fresh entry already exists.
    ///
    /// Returns `Ok(Some(written_at))` when a new entry was stored and
    /// `Ok(None)` when nothing was written.
    pub fn write(&self, identifier: &str, items: &[ItemRecord]) -> Result<Option<SystemTime>> {
        if !self.config.enabled {
            return Ok(None);
        }
        let key = self.key_for(identifier);
        if let Some(existing) = self.lookup(&key) {
            self.stats.skipped_writes.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, written_at = ?existing.written_at, "fresh entry present, write skipped");
            return Ok(None);
        }

        let data = match serde_json::to_vec(items) {
            Ok(d) => d,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                return Err(e.into());
            }
        };
        let written_at = self.clock.now();
        match self.backend.put(&key, &data, written_at) {
            Ok(()) => {
                self.stats.writes.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, items = items.len(), bytes = data.len(), "cache entry written");
                Ok(Some(written_at))
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    pub fn backend(&self) -> &dyn CacheBackend {
        self.backend.as_ref()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    /// Fresh, decodable entry for `key`, if any.
    fn lookup(&self, key: &CacheKey) -> Option<CachedCollection> {
        let entry = match self.backend.get(key) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key = %key, "cache entry absent");
                return None;
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, backend = self.backend.name(), error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        if !self.policy.is_fresh(entry.written_at, self.clock.now()) {
            debug!(key = %key, written_at = ?entry.written_at, "cache entry stale");
            return None;
        }
        match serde_json::from_slice::<Vec<ItemRecord>>(&entry.data) {
            Ok(items) => Some(CachedCollection {
                items,
                written_at: entry.written_at,
            }),
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }
}
