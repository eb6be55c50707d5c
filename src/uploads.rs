use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::youtube::{PlaylistItemResource, YouTubeClient};

/// A video reference taken from the uploads listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoListingEntry {
    pub video_id: String,
    pub published_at: DateTime<Utc>,
}

impl VideoListingEntry {
    fn from_resource(item: PlaylistItemResource) -> Option<Self> {
        let video_id = item.content_details?.video_id?;
        let published_at = item.snippet?.published_at?;
        Some(Self { video_id, published_at })
    }
}

/// Map a channel ID to its uploads playlist ID; `Ok(None)` when the channel
/// doesn't exist or exposes no uploads playlist
pub async fn find_uploads_playlist(client: &YouTubeClient, channel_id: &str) -> Result<Option<String>> {
    client.uploads_playlist_id(channel_id).await
}

/// Lazy cursor over a playlist. Pages are requested only when the buffered
/// items run out, so a consumer that stops early never pays for the rest.
pub struct PlaylistWalker<'a> {
    client: &'a YouTubeClient,
    playlist_id: String,
    buffer: VecDeque<VideoListingEntry>,
    next_page_token: Option<String>,
    pages_fetched: usize,
    exhausted: bool,
}

impl<'a> PlaylistWalker<'a> {
    pub fn new(client: &'a YouTubeClient, playlist_id: impl Into<String>) -> Self {
        Self {
            client,
            playlist_id: playlist_id.into(),
            buffer: VecDeque::new(),
            next_page_token: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    /// Next listing entry, or `None` once the playlist is exhausted
    pub async fn next(&mut self) -> Result<Option<VideoListingEntry>> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let page = self
            .client
            .playlist_items_page(&self.playlist_id, self.next_page_token.as_deref())
            .await?;
        self.pages_fetched += 1;

        let received = page.items.len();
        self.buffer
            .extend(page.items.into_iter().filter_map(VideoListingEntry::from_resource));
        if self.buffer.len() < received {
            debug!("Skipped {} playlist item(s) without video ID or date", received - self.buffer.len());
        }

        self.next_page_token = page.next_page_token.filter(|t| !t.is_empty());
        self.exhausted = self.next_page_token.is_none();
        debug!(
            "Fetched page {} of {}: {} item(s), more: {}",
            self.pages_fetched, self.playlist_id, received, !self.exhausted
        );
        Ok(())
    }
}

/// Last representable microsecond of a day
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999) {
    Some(t) => t,
    None => panic!("23:59:59.999999 is a valid time"),
};

/// Inclusive UTC window spanning whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// From the start of `start` to 23:59:59.999999 on `end`
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Config(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: end.and_time(END_OF_DAY).and_utc(),
        })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Walk the playlist and keep entries published within `range`.
///
/// With `limit > 0` the walk stops as soon as that many entries are kept;
/// `limit == 0` walks to the end.
pub async fn collect_in_range(
    walker: &mut PlaylistWalker<'_>,
    range: &DateRange,
    limit: usize,
) -> Result<Vec<VideoListingEntry>> {
    let mut collected = Vec::new();
    while let Some(entry) = walker.next().await? {
        if range.contains(&entry.published_at) {
            collected.push(entry);
        }
        if limit > 0 && collected.len() >= limit {
            info!("Reached limit of {} video(s), stopping early", limit);
            break;
        }
    }
    debug!(
        "Kept {} video(s) after {} page(s)",
        collected.len(),
        walker.pages_fetched()
    );
    Ok(collected)
}
