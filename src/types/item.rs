//! Playlist item records.

use serde::{Deserialize, Serialize};

/// A single video of a playlist.
///
/// Field names on the wire (and in cache files) are kept as `ID`, `Title`,
/// `ThumbnailURL` and `Duration` so existing consumers keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ThumbnailURL")]
    pub thumbnail_url: String,
    /// Whole seconds; `0` when the upstream duration could not be parsed.
    #[serde(rename = "Duration")]
    pub duration_seconds: i64,
}

impl ItemRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: String::new(),
            duration_seconds: 0,
        }
    }

    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }

    pub fn with_duration_seconds(mut self, seconds: i64) -> Self {
        self.duration_seconds = seconds;
        self
    }
}

/// Response body for `GET /lists/:list_id/videos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistVideos {
    #[serde(rename = "Videos")]
    pub videos: Vec<ItemRecord>,
    #[serde(rename = "Count")]
    pub count: usize,
    /// Unix seconds of the cache entry backing this response, `0` if none was recorded.
    #[serde(rename = "CacheTime")]
    pub cache_time: i64,
}

impl PlaylistVideos {
    pub fn new(videos: Vec<ItemRecord>, cache_time: i64) -> Self {
        Self {
            count: videos.len(),
            videos,
            cache_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_wire_names() {
        let item = ItemRecord::new("a", "First")
            .with_thumbnail_url("https://example.com/a.jpg")
            .with_duration_seconds(61);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ID": "a",
                "Title": "First",
                "ThumbnailURL": "https://example.com/a.jpg",
                "Duration": 61
            })
        );
    }

    #[test]
    fn test_playlist_videos_counts_items() {
        let body = PlaylistVideos::new(vec![ItemRecord::new("a", "A"), ItemRecord::new("b", "B")], 0);
        assert_eq!(body.count, 2);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["Count"], 2);
        assert_eq!(json["CacheTime"], 0);
        assert_eq!(json["Videos"][1]["ID"], "b");
    }
}
