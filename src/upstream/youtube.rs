use super::PlaylistSource;
use crate::types::{duration_to_seconds, ItemRecord};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// `videos.list` accepts at most this many ids per call.
pub const MAX_IDS_PER_REQUEST: usize = 50;

#[derive(Debug, Clone)]
pub struct YouTubeClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl YouTubeClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemListResponse {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Video {
    id: String,
    snippet: VideoSnippet,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl From<Video> for ItemRecord {
    fn from(video: Video) -> Self {
        let thumbnail_url = video
            .snippet
            .thumbnails
            .high
            .map(|t| t.url)
            .unwrap_or_default();
        let duration_seconds = video
            .content_details
            .map(|c| duration_to_seconds(&c.duration))
            .unwrap_or(0);
        ItemRecord::new(video.id, video.snippet.title)
            .with_thumbnail_url(thumbnail_url)
            .with_duration_seconds(duration_seconds)
    }
}

/// Playlist source backed by the YouTube Data API v3.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(config: YouTubeClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to build HTTP client: {}", e),
                    ErrorContext::new().with_source("youtube_client"),
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_videos(&self, ids: &[String]) -> Result<Vec<ItemRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let joined = chunk.join(",");
            let resp: VideoListResponse = self
                .get_json(
                    "videos",
                    &[("part", "snippet,contentDetails"), ("id", joined.as_str())],
                )
                .await?;
            records.extend(resp.items.into_iter().map(ItemRecord::from));
        }
        Ok(records)
    }
}

#[async_trait]
impl PlaylistSource for YouTubeClient {
    async fn fetch_collection(&self, identifier: &str) -> Result<Vec<ItemRecord>> {
        if identifier.is_empty() {
            return Err(Error::validation_with_context(
                "playlist id is empty",
                ErrorContext::new()
                    .with_field_path("playlist_id")
                    .with_source("youtube_client"),
            ));
        }

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;
        let max_results = MAX_IDS_PER_REQUEST.to_string();
        loop {
            let mut query = vec![
                ("part", "snippet"),
                ("playlistId", identifier),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(ref token) = page_token {
                query.push(("pageToken", token.as_str()));
            }
            let page: PlaylistItemListResponse = self.get_json("playlistItems", &query).await?;

            let ids: Vec<String> = page
                .items
                .into_iter()
                .filter_map(|item| item.snippet.resource_id.video_id)
                .collect();
            debug!(playlist = identifier, ids = ids.len(), "playlist page fetched");
            videos.extend(self.fetch_videos(&ids).await?);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let cfg = YouTubeClientConfig::new("k");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_video_maps_to_item() {
        let video: Video = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "snippet": {
                "title": "A video",
                "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/abc/hqdefault.jpg" } }
            },
            "contentDetails": { "duration": "PT4M13S" }
        }))
        .unwrap();
        let item = ItemRecord::from(video);
        assert_eq!(item.id, "abc");
        assert_eq!(item.title, "A video");
        assert_eq!(item.thumbnail_url, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
        assert_eq!(item.duration_seconds, 253);
    }

    #[test]
    fn test_video_without_details_degrades() {
        let video: Video = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "snippet": { "title": "Private video" }
        }))
        .unwrap();
        let item = ItemRecord::from(video);
        assert_eq!(item.thumbnail_url, "");
        assert_eq!(item.duration_seconds, 0);
    }

    #[tokio::test]
    async fn test_empty_identifier_rejected() {
        let client = YouTubeClient::new(YouTubeClientConfig::new("k")).unwrap();
        let err = client.fetch_collection("").await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
