//! 上游数据源模块：从视频托管平台拉取播放列表内容。
//!
//! # Upstream Module
//!
//! The cache never talks to the upstream itself. [`PlaylistSource`] is the
//! seam the fetch orchestrator calls on a miss; [`YouTubeClient`] is the
//! production implementation over the YouTube Data API v3.

mod youtube;

pub use youtube::{YouTubeClient, YouTubeClientConfig, DEFAULT_BASE_URL, MAX_IDS_PER_REQUEST};

use crate::types::ItemRecord;
use crate::Result;
use async_trait::async_trait;

/// Something that can rebuild a playlist from the authoritative source.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Fetch every item of `identifier`, in playlist order.
    async fn fetch_collection(&self, identifier: &str) -> Result<Vec<ItemRecord>>;

    fn name(&self) -> &'static str;
}
