use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Items per page for paginated listings (API maximum)
pub const PAGE_SIZE: usize = 50;

/// IDs per `videos.list` call (API maximum)
pub const MAX_IDS_PER_LOOKUP: usize = 50;

// Search

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: Option<SearchResultId>,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSnippet {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

impl SearchResult {
    fn channel_id(self) -> Option<String> {
        self.snippet
            .and_then(|s| s.channel_id)
            .or_else(|| self.id.and_then(|id| id.channel_id))
    }
}

// Channels

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

// Playlist items

#[derive(Debug, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemResource {
    pub snippet: Option<PlaylistItemSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

// Videos

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium thumbnail, falling back to the default one
    pub fn preferred_url(&self) -> Option<String> {
        self.medium
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    /// The API sends counts as decimal strings
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>, // ISO 8601, e.g. PT1M30S
}

// Errors

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// YouTube Data API v3 client
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::ApiKeyMissing);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET against `endpoint` and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(Error::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Channel-type search; returns the first result's channel ID
    pub async fn search_channel(&self, query: &str) -> Result<Option<String>> {
        let resp: SearchListResponse = self
            .get(
                "search",
                &[("part", "snippet"), ("type", "channel"), ("maxResults", "1"), ("q", query)],
            )
            .await?;
        Ok(resp.items.into_iter().next().and_then(SearchResult::channel_id))
    }

    /// Legacy username lookup
    pub async fn channel_for_username(&self, username: &str) -> Result<Option<String>> {
        let resp: ChannelListResponse = self
            .get("channels", &[("part", "id"), ("forUsername", username)])
            .await?;
        Ok(resp.items.into_iter().next().map(|c| c.id))
    }

    /// Look up the uploads playlist of a channel
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        let resp: ChannelListResponse = self
            .get(
                "channels",
                &[("part", "contentDetails"), ("id", channel_id), ("maxResults", "1")],
            )
            .await?;
        Ok(resp
            .items
            .into_iter()
            .next()
            .and_then(|c| c.content_details)
            .and_then(|d| d.related_playlists)
            .and_then(|p| p.uploads))
    }

    /// Fetch one page of a playlist
    pub async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse> {
        let max_results = PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get("playlistItems", &params).await
    }

    /// Fetch snippet, content details and statistics for up to 50 videos
    pub async fn videos(&self, ids: &[String]) -> Result<Vec<VideoResource>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Looking up {} video(s)", ids.len());

        let joined = ids.join(",");
        let max_results = MAX_IDS_PER_LOOKUP.to_string();
        let resp: VideoListResponse = self
            .get(
                "videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", joined.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;
        Ok(resp.items)
    }
}
