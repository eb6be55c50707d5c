use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};
use regex::Regex;
use serde::Serialize;

use crate::stats::VideoStats;
use crate::uploads::VideoListingEntry;

static ISO_DURATION: OnceLock<Regex> = OnceLock::new();

/// One line of output: a listed video joined with its stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub title: String,
    pub views: u64,
    pub published: DateTime<Utc>,
    pub duration: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

/// Canonical watch page for a video
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Join listing entries with their stats, in listing order.
/// Entries without stats are dropped.
pub fn build_rows(entries: &[VideoListingEntry], stats: &HashMap<String, VideoStats>) -> Vec<DisplayRow> {
    entries
        .iter()
        .filter_map(|entry| {
            let video = stats.get(&entry.video_id)?;
            Some(DisplayRow {
                title: video.title.clone(),
                views: video.view_count,
                published: video.published_at.unwrap_or(entry.published_at),
                duration: video.duration.clone(),
                url: watch_url(&entry.video_id),
                thumbnail_url: video.thumbnail_url.clone(),
            })
        })
        .collect()
}

/// Most viewed first; equal counts keep their relative order
pub fn sort_by_views(rows: &mut [DisplayRow]) {
    rows.sort_by(|a, b| b.views.cmp(&a.views));
}

/// Parse an ISO 8601 duration such as `PT1H2M3S` or `P1DT5M` into seconds
pub fn parse_iso_duration(iso: &str) -> Option<u64> {
    let re = ISO_DURATION.get_or_init(|| {
        Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
            .expect("duration pattern is valid")
    });
    let caps = re.captures(iso.trim())?;

    let mut total = 0u64;
    for (group, unit) in [(1, 86_400), (2, 3_600), (3, 60), (4, 1)] {
        if let Some(m) = caps.get(group) {
            let part = m.as_str().parse::<u64>().ok()?.checked_mul(unit)?;
            total = total.checked_add(part)?;
        }
    }
    Some(total)
}

/// `H:MM:SS` or `M:SS`; unparseable durations are returned as-is
pub fn format_duration(iso: &str) -> String {
    match parse_iso_duration(iso) {
        Some(secs) => {
            let hours = secs / 3600;
            let mins = (secs % 3600) / 60;
            let secs = secs % 60;
            if hours > 0 {
                format!("{}:{:02}:{:02}", hours, mins, secs)
            } else {
                format!("{}:{:02}", mins, secs)
            }
        }
        None => iso.to_string(),
    }
}

/// Full view count with thousands separators
pub fn format_views(views: u64) -> String {
    format!("{} views", views.to_formatted_string(&Locale::en))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, day: u32) -> VideoListingEntry {
        VideoListingEntry {
            video_id: id.to_string(),
            published_at: Utc.with_ymd_and_hms(2023, 7, day, 0, 0, 0).unwrap(),
        }
    }

    fn stats(id: &str, views: u64) -> (String, VideoStats) {
        (
            id.to_string(),
            VideoStats {
                id: id.to_string(),
                title: format!("Video {}", id),
                published_at: None,
                view_count: views,
                duration: "PT1M".to_string(),
                thumbnail_url: None,
            },
        )
    }

    #[test]
    fn higher_views_come_first() {
        let entries = vec![entry("a", 1), entry("b", 1)];
        let table: HashMap<_, _> = [stats("a", 500), stats("b", 1500)].into_iter().collect();

        let mut rows = build_rows(&entries, &table);
        sort_by_views(&mut rows);

        let views: Vec<u64> = rows.iter().map(|r| r.views).collect();
        assert_eq!(views, vec![1500, 500]);
        assert_eq!(rows[0].url, "https://www.youtube.com/watch?v=b");
    }

    #[test]
    fn ties_keep_listing_order() {
        let entries = vec![entry("x", 3), entry("y", 2), entry("z", 1), entry("w", 1)];
        let table: HashMap<_, _> = [stats("x", 10), stats("y", 20), stats("z", 10), stats("w", 20)]
            .into_iter()
            .collect();

        let mut rows = build_rows(&entries, &table);
        sort_by_views(&mut rows);

        let urls: Vec<&str> = rows.iter().map(|r| r.url.rsplit('=').next().unwrap()).collect();
        assert_eq!(urls, vec!["y", "w", "x", "z"]);
        assert!(rows.windows(2).all(|w| w[0].views >= w[1].views));
    }

    #[test]
    fn missing_stats_are_dropped() {
        let entries = vec![entry("a", 1), entry("gone", 2), entry("a", 3)];
        let table: HashMap<_, _> = [stats("a", 7)].into_iter().collect();

        let rows = build_rows(&entries, &table);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.views == 7));
    }

    #[test]
    fn published_falls_back_to_listing_date() {
        let entries = vec![entry("a", 9)];
        let table: HashMap<_, _> = [stats("a", 1)].into_iter().collect();
        let rows = build_rows(&entries, &table);
        assert_eq!(rows[0].published, entries[0].published_at);
    }

    #[test]
    fn durations() {
        assert_eq!(parse_iso_duration("PT4M13S"), Some(253));
        assert_eq!(parse_iso_duration("PT1H"), Some(3600));
        assert_eq!(parse_iso_duration("P1DT2S"), Some(86_402));
        assert_eq!(parse_iso_duration("P0D"), Some(0));
        assert_eq!(parse_iso_duration("nonsense"), None);

        assert_eq!(format_duration("PT4M13S"), "4:13");
        assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_duration("PT45S"), "0:45");
        assert_eq!(format_duration(""), "");
    }

    #[test]
    fn oversized_duration_is_shown_raw() {
        assert_eq!(parse_iso_duration("P999999999999999999D"), None);
        assert_eq!(parse_iso_duration("P213503982334601DT23H59M59S"), None);
        assert_eq!(format_duration("P999999999999999999D"), "P999999999999999999D");
    }

    #[test]
    fn views_have_separators() {
        assert_eq!(format_views(0), "0 views");
        assert_eq!(format_views(1_234_567), "1,234,567 views");
    }
}
