//! Cache backend implementations.

use super::key::CacheKey;
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::SystemTime;

/// File extension of persisted entries.
pub const ENTRY_EXTENSION: &str = "ytvp-cache";

/// Raw bytes of an entry plus the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub data: Vec<u8>,
    pub written_at: SystemTime,
}

/// Key/value storage capability underneath [`CacheStore`](super::CacheStore).
///
/// Backends know nothing about freshness or serialization. `put` must be
/// atomic from the point of view of a concurrent `get`: a reader sees either
/// the previous entry or the new one, never a mix.
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>>;
    fn put(&self, key: &CacheKey, value: &[u8], written_at: SystemTime) -> Result<()>;
    fn name(&self) -> &'static str;
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One file per key inside a directory; the file's mtime is the write time.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.{}", key.as_str(), ENTRY_EXTENSION))
    }

    fn tmp_path_for(&self, key: &CacheKey) -> PathBuf {
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            "{}.{}.{}.{}.tmp",
            key.as_str(),
            ENTRY_EXTENSION,
            std::process::id(),
            seq
        ))
    }
}

fn write_tmp(path: &Path, value: &[u8], written_at: SystemTime) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(value)?;
    // Must come after the last write, or the write bumps the mtime again.
    file.set_modified(written_at)?;
    file.sync_all()
}

impl CacheBackend for FileCache {
    fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>> {
        let mut file = match File::open(self.path_for(key)) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // Metadata and content from the same handle, so a concurrent rename
        // cannot pair one entry's time with another entry's bytes.
        let written_at = file.metadata()?.modified()?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(StoredEntry { data, written_at }))
    }

    fn put(&self, key: &CacheKey, value: &[u8], written_at: SystemTime) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.tmp_path_for(key);

        if let Err(e) = write_tmp(&tmp, value, written_at) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Process-local backend, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::runtime_with_context(
        "MemoryCache poisoned",
        ErrorContext::new().with_source("memory_cache"),
    )
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&key.hash).cloned())
    }

    fn put(&self, key: &CacheKey, value: &[u8], written_at: SystemTime) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(
            key.hash.clone(),
            StoredEntry {
                data: value.to_vec(),
                written_at,
            },
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Backend that stores nothing; every lookup misses.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for NullCache {
    fn get(&self, _: &CacheKey) -> Result<Option<StoredEntry>> {
        Ok(None)
    }
    fn put(&self, _: &CacheKey, _: &[u8], _: SystemTime) -> Result<()> {
        Ok(())
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
