//! # ytvp
//!
//! 播放列表视频元数据服务：从视频托管平台获取播放列表内容，并通过文件系统直通缓存避免重复的上游调用。
//!
//! Playlist video metadata service. Answers "give me the videos in playlist X"
//! from the YouTube Data API, with a filesystem fetch-through cache in front
//! of it.
//!
//! ## Overview
//!
//! - **Cache**: [`cache::CacheStore`] derives a fixed-width key per playlist,
//!   serves entries younger than the TTL (6 hours by default) and skips
//!   writes while a fresh entry exists.
//! - **Upstream**: [`upstream::PlaylistSource`] is the fetch seam;
//!   [`upstream::YouTubeClient`] pages through the playlist and resolves
//!   video details 50 ids at a time.
//! - **Orchestration**: [`PlaylistService`] sequences read, fetch on miss and
//!   write; cache failures never fail a lookup.
//! - **HTTP**: [`server::router`] exposes `GET /lists/:list_id/videos`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ytvp::cache::{CacheStore, FileCache};
//! use ytvp::upstream::YouTubeClient;
//! use ytvp::{PlaylistService, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> ytvp::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let cache = Arc::new(CacheStore::new(
//!         config.cache_config(),
//!         Box::new(FileCache::new(&config.cache_dir)),
//!     ));
//!     let source = Arc::new(YouTubeClient::new(config.client_config())?);
//!     let service = PlaylistService::new(cache, source);
//!
//!     let body = service.videos("PLxxxxxxxx").await?;
//!     println!("{} videos", body.count);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Key derivation, staleness policy, store and backends |
//! | [`upstream`] | Playlist sources (YouTube Data API v3) |
//! | [`service`] | Fetch-through orchestration |
//! | [`server`] | axum router |
//! | [`config`] | `YTVP_*` environment configuration |
//! | [`types`] | Item records and duration parsing |

pub mod cache;
pub mod config;
pub mod server;
pub mod service;
pub mod types;
pub mod upstream;

pub use config::ServiceConfig;
pub use service::PlaylistService;
pub use types::{ItemRecord, PlaylistVideos};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
