use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::rows::DisplayRow;

/// Default file name for `--csv` without a path
pub const DEFAULT_CSV_FILE: &str = "channel_videos_sorted.csv";

const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Views")]
    views: u64,
    #[serde(rename = "Published")]
    published: String,
    #[serde(rename = "Duration")]
    duration: &'a str,
    #[serde(rename = "Video URL")]
    url: &'a str,
}

impl<'a> From<&'a DisplayRow> for CsvRecord<'a> {
    fn from(row: &'a DisplayRow) -> Self {
        Self {
            title: &row.title,
            views: row.views,
            published: row.published.format(PUBLISHED_FORMAT).to_string(),
            duration: &row.duration,
            url: &row.url,
        }
    }
}

/// Write rows as CSV (thumbnails are not exported)
pub fn write_csv<W: Write>(rows: &[DisplayRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record(["Title", "Views", "Published", "Duration", "Video URL"])?;
    }
    for row in rows {
        csv.serialize(CsvRecord::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write rows to a CSV file at `path`
pub fn save_csv(rows: &[DisplayRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(title: &str, views: u64) -> DisplayRow {
        DisplayRow {
            title: title.to_string(),
            views,
            published: Utc.with_ymd_and_hms(2023, 7, 4, 18, 5, 9).unwrap(),
            duration: "PT10M".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            thumbnail_url: Some("https://i.ytimg.com/vi/abc/mqdefault.jpg".to_string()),
        }
    }

    fn render(rows: &[DisplayRow]) -> String {
        let mut out = Vec::new();
        write_csv(rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_and_formatting() {
        let csv = render(&[row("First", 1500), row("Second, with comma", 500)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Title,Views,Published,Duration,Video URL");
        assert_eq!(
            lines[1],
            "First,1500,2023-07-04 18:05:09,PT10M,https://www.youtube.com/watch?v=abc"
        );
        assert!(lines[2].starts_with("\"Second, with comma\",500,"));
        assert!(!csv.contains("ytimg"));
    }

    #[test]
    fn empty_export_still_has_header() {
        assert_eq!(render(&[]), "Title,Views,Published,Duration,Video URL\n");
    }
}
