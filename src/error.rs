use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not set. Pass --api-key, set YOUTUBE_API_KEY, or run `channel-sorter init`.")]
    ApiKeyMissing,

    #[error("Could not resolve the channel '{0}'. Try pasting the channel URL or the @handle.")]
    ChannelNotFound(String),

    #[error("Could not find the uploads playlist for channel {0}.")]
    UploadsNotFound(String),

    #[error("Failed to create API client: {0}")]
    Client(reqwest::Error),

    #[error("YouTube API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
