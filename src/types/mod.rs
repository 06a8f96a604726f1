//! 类型模块：定义播放列表视频条目及其时长换算。
//!
//! # Types Module
//!
//! Core data types shared by the cache, the upstream client and the HTTP layer.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ItemRecord`] | One video in a playlist, as cached and served |
//! | [`PlaylistVideos`] | Response body for a playlist lookup |
//! | [`duration_to_seconds`] | ISO-8601 duration to whole seconds |
//!
//! ## Example
//!
//! ```rust
//! use ytvp::types::{duration_to_seconds, ItemRecord};
//!
//! let item = ItemRecord::new("dQw4w9WgXcQ", "Never Gonna Give You Up")
//!     .with_thumbnail_url("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
//!     .with_duration_seconds(duration_to_seconds("PT3M33S"));
//! assert_eq!(item.duration_seconds, 213);
//! ```

pub mod duration;
pub mod item;

pub use duration::duration_to_seconds;
pub use item::{ItemRecord, PlaylistVideos};
