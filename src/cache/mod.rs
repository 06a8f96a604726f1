//! 播放列表缓存模块：基于文件系统的直通缓存，减少重复的上游 API 调用。
//!
//! # Playlist Cache Module
//!
//! A single-node, best-effort fetch-through cache for playlist contents.
//! Callers sequence the flow themselves: [`CacheStore::read`], on a miss fetch
//! from the upstream, then [`CacheStore::write`].
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`KeyDeriver`] | Identifier to fixed-width SHA-256 [`CacheKey`] |
//! | [`StalenessPolicy`] | Single-TTL freshness check (default 6 hours) |
//! | [`CacheStore`] | Read/write contract over a backend, with stats |
//! | [`CacheBackend`] | Trait for storage backends |
//! | [`FileCache`] | One file per key, atomic replace, mtime as write time |
//! | [`MemoryCache`] | In-process map |
//! | [`NullCache`] | No-op backend |
//!
//! ## Example
//!
//! ```rust
//! use ytvp::cache::{CacheConfig, CacheStore, FileCache};
//! use ytvp::types::ItemRecord;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = CacheStore::new(CacheConfig::default(), Box::new(FileCache::new(dir.path())));
//!
//! if store.read("PLdoc").is_none() {
//!     let items = vec![ItemRecord::new("a", "First"), ItemRecord::new("b", "Second")];
//!     let _ = store.write("PLdoc", &items);
//! }
//! assert_eq!(store.read("PLdoc").unwrap().items.len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! There is no per-key locking. Two requests missing on the same playlist may
//! both fetch and both write; the freshness re-check inside `write` and the
//! atomic replace in [`FileCache`] keep that race down to redundant upstream
//! work.

mod backend;
mod key;
mod policy;
mod store;

pub use backend::{CacheBackend, FileCache, MemoryCache, NullCache, StoredEntry, ENTRY_EXTENSION};
pub use key::{CacheKey, KeyDeriver};
pub use policy::{Clock, ManualClock, StalenessPolicy, SystemClock, DEFAULT_TTL};
pub use store::{CacheConfig, CacheStats, CacheStore, CachedCollection};
