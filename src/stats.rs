use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::Result;
use crate::youtube::{MAX_IDS_PER_LOOKUP, VideoResource, YouTubeClient};

/// Per-video metadata and statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub id: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    /// ISO 8601 duration as sent by the API
    pub duration: String,
    pub thumbnail_url: Option<String>,
}

impl From<VideoResource> for VideoStats {
    fn from(video: VideoResource) -> Self {
        let (title, published_at, thumbnail_url) = match video.snippet {
            Some(snippet) => (
                snippet.title.unwrap_or_default(),
                snippet.published_at,
                snippet.thumbnails.and_then(|t| t.preferred_url()),
            ),
            None => (String::new(), None, None),
        };

        Self {
            id: video.id,
            title,
            published_at,
            view_count: video
                .statistics
                .and_then(|s| s.view_count)
                .map_or(0, |v| parse_count(&v)),
            duration: video
                .content_details
                .and_then(|d| d.duration)
                .unwrap_or_default(),
            thumbnail_url,
        }
    }
}

/// Non-numeric counts are treated as zero
fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// Fetch stats for `video_ids` in batches of 50 and merge them by ID.
///
/// IDs missing from a response (deleted or private videos) are simply
/// absent from the result.
pub async fn fetch_video_stats(
    client: &YouTubeClient,
    video_ids: &[String],
) -> Result<HashMap<String, VideoStats>> {
    let mut stats = HashMap::with_capacity(video_ids.len());

    for (i, batch) in video_ids.chunks(MAX_IDS_PER_LOOKUP).enumerate() {
        let videos = client.videos(batch).await?;
        debug!("Batch {}: requested {}, received {}", i + 1, batch.len(), videos.len());
        for video in videos {
            stats.insert(video.id.clone(), VideoStats::from(video));
        }
    }

    Ok(stats)
}
