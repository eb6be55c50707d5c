use log::info;

use crate::channel::resolve_channel_id;
use crate::error::{Error, Result};
use crate::rows::{DisplayRow, build_rows, sort_by_views};
use crate::stats::fetch_video_stats;
use crate::uploads::{DateRange, PlaylistWalker, collect_in_range, find_uploads_playlist};
use crate::youtube::YouTubeClient;

/// Parameters for a single fetch-and-sort run
#[derive(Debug, Clone)]
pub struct SortRequest {
    /// Channel URL, @handle, channel ID or search text
    pub channel: String,
    pub range: DateRange,
    /// Stop after this many in-range videos; 0 for no limit
    pub limit: usize,
}

#[derive(Debug)]
pub struct SortOutcome {
    pub channel_id: String,
    pub uploads_playlist_id: String,
    /// Sorted by views, most viewed first. Empty when nothing was published in range.
    pub rows: Vec<DisplayRow>,
}

/// Resolve the channel, list its uploads in range, fetch stats and sort
pub async fn fetch_sorted_videos(client: &YouTubeClient, request: &SortRequest) -> Result<SortOutcome> {
    let channel_id = resolve_channel_id(client, &request.channel)
        .await?
        .ok_or_else(|| Error::ChannelNotFound(request.channel.trim().to_string()))?;
    info!("Resolved channel {}", channel_id);

    let uploads_playlist_id = find_uploads_playlist(client, &channel_id)
        .await?
        .ok_or_else(|| Error::UploadsNotFound(channel_id.clone()))?;
    info!("Uploads playlist {}", uploads_playlist_id);

    let mut walker = PlaylistWalker::new(client, uploads_playlist_id.clone());
    let entries = collect_in_range(&mut walker, &request.range, request.limit).await?;

    if entries.is_empty() {
        return Ok(SortOutcome {
            channel_id,
            uploads_playlist_id,
            rows: Vec::new(),
        });
    }

    let ids: Vec<String> = entries.iter().map(|e| e.video_id.clone()).collect();
    let stats = fetch_video_stats(client, &ids).await?;

    let mut rows = build_rows(&entries, &stats);
    sort_by_views(&mut rows);
    info!("Built {} row(s) from {} listed video(s)", rows.len(), entries.len());

    Ok(SortOutcome {
        channel_id,
        uploads_playlist_id,
        rows,
    })
}
