use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};

use crate::config::{api_base_url, resolve_api_key};
use crate::error::{Error, Result};
use crate::export::save_csv;
use crate::pipeline::{SortRequest, fetch_sorted_videos};
use crate::rows::{DisplayRow, format_duration, format_views};
use crate::uploads::DateRange;
use crate::youtube::YouTubeClient;

pub struct SortOptions {
    pub channel: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: usize,
    pub api_key: Option<String>,
    pub csv: Option<PathBuf>,
    pub json: bool,
}

pub async fn run(options: SortOptions) -> Result<()> {
    let api_key = resolve_api_key(options.api_key.as_deref())?;
    if options.channel.trim().is_empty() {
        return Err(Error::Config("Please enter a channel handle or URL.".to_string()));
    }

    // Default window: the last 365 days
    let end = options.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = options.start.unwrap_or(end - Duration::days(365));
    let range = DateRange::from_dates(start, end)?;

    let client = YouTubeClient::new(api_key, api_base_url())?;

    eprintln!("Fetching videos from channel...");
    let request = SortRequest {
        channel: options.channel,
        range,
        limit: options.limit,
    };
    let outcome = fetch_sorted_videos(&client, &request).await?;

    if outcome.rows.is_empty() {
        println!("No videos in that date range.");
        return Ok(());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
    } else {
        println!(
            "Found {} videos between {} and {}. Sorted by view count descending.\n",
            outcome.rows.len(),
            start,
            end
        );
        for (i, row) in outcome.rows.iter().enumerate() {
            print_row(i + 1, row);
        }
    }

    if let Some(path) = options.csv {
        save_csv(&outcome.rows, &path)?;
        eprintln!("CSV saved to {}", path.display());
    }

    Ok(())
}

fn print_row(index: usize, row: &DisplayRow) {
    let duration_str = if row.duration.is_empty() {
        String::new()
    } else {
        format!(" ({})", format_duration(&row.duration))
    };

    println!("{}. {}{}", index, row.title, duration_str);
    println!(
        "   {} | {}",
        format_views(row.views),
        row.published.format("%Y-%m-%d")
    );

    // URL for easy copying
    println!("   {}", row.url);
    if let Some(thumb) = &row.thumbnail_url {
        println!("   Thumbnail: {}", thumb);
    }
    println!();
}
