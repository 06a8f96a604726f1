//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use ytvp::types::ItemRecord;
use ytvp::upstream::PlaylistSource;
use ytvp::{Error, Result};

pub fn items(ids: &[&str]) -> Vec<ItemRecord> {
    ids.iter()
        .map(|id| {
            ItemRecord::new(*id, format!("Video {}", id))
                .with_thumbnail_url(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id))
                .with_duration_seconds(90)
        })
        .collect()
}

/// Playlist source that returns canned items and counts calls.
pub struct FakeSource {
    items: Mutex<Vec<ItemRecord>>,
    fail_with: Option<u16>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            items: Mutex::new(items),
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails with an upstream error of this HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail_with: Some(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_items(&self, items: Vec<ItemRecord>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaylistSource for FakeSource {
    async fn fetch_collection(&self, _identifier: &str) -> Result<Vec<ItemRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with {
            return Err(Error::Remote {
                status,
                message: "upstream unavailable".into(),
            });
        }
        Ok(self.items.lock().unwrap().clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
