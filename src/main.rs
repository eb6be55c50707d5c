use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;

use channel_sorter::commands;
use channel_sorter::commands::sort::SortOptions;
use channel_sorter::config::{MAX_LIMIT, load_env};
use channel_sorter::export::DEFAULT_CSV_FILE;

#[derive(Parser)]
#[command(name = "channel-sorter")]
#[command(about = "Sort a YouTube channel's uploads by view count within a date range")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a channel's uploads and sort them by views
    Sort {
        /// Channel handle or URL (e.g., @LinusTechTips, https://www.youtube.com/@LinusTechTips or a channel ID)
        channel: String,

        /// First day to include, YYYY-MM-DD (default: 365 days before --end)
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// Last day to include, YYYY-MM-DD (default: today, UTC)
        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// Stop after this many videos in range, to save quota (0 for all)
        #[arg(short = 'n', long, default_value = "0", value_parser = clap::value_parser!(u64).range(0..=MAX_LIMIT))]
        limit: u64,

        /// YouTube Data API key (default: YOUTUBE_API_KEY)
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Also write the results as CSV (default file: channel_videos_sorted.csv)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CSV_FILE)]
        csv: Option<PathBuf>,

        /// Print the rows as JSON instead of a list
        #[arg(short, long)]
        json: bool,
    },

    /// Save a YouTube Data API key
    Init {
        /// YouTube Data API key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    // Load environment variables
    load_env();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort { channel, start, end, limit, api_key, csv, json } => {
            commands::sort::run(SortOptions {
                channel,
                start,
                end,
                limit: usize::try_from(limit).unwrap_or(usize::MAX),
                api_key,
                csv,
                json,
            })
            .await
        }
        Commands::Init { api_key, force } => commands::init::run(api_key, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
