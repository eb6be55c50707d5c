use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::warn;

use crate::error::{Error, Result};

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Default YouTube Data API v3 endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Upper bound for the `--limit` option
pub const MAX_LIMIT: u64 = 5000;

/// Get the base data directory (~/.channel-sorter/)
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        std::env::var("CHANNEL_SORTER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".channel-sorter")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Load environment variables from the data directory's .env file
pub fn load_env() {
    let env_path = env_file_path();
    if env_path.exists() {
        load_env_file(&env_path);
    } else {
        // Try current directory as fallback
        let _ = dotenvy::dotenv();
    }
}

/// Load one .env file, warning when it exists but can't be parsed
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not load {}: {}", path.display(), e);
            false
        }
    }
}

/// Get the YouTube Data API key from the environment
pub fn youtube_api_key() -> Option<String> {
    std::env::var("YOUTUBE_API_KEY").ok()
}

/// Pick the API key: explicit flag first, then environment. Blank keys count as missing.
pub fn resolve_api_key(flag: Option<&str>) -> Result<String> {
    flag.map(str::to_string)
        .or_else(youtube_api_key)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(Error::ApiKeyMissing)
}

/// Base URL for API calls, overridable for testing against a local server
pub fn api_base_url() -> String {
    std::env::var("YOUTUBE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Create the data directory if it doesn't exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}
