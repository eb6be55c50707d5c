use log::{debug, warn};
use reqwest::Url;

use crate::error::Result;
use crate::youtube::YouTubeClient;

/// Prefix shared by all canonical channel IDs
const CHANNEL_ID_PREFIX: &str = "UC";

/// Minimum length for bare input to be taken as a channel ID
const MIN_CHANNEL_ID_LEN: usize = 20;

/// What the user pointed at, before any API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReference {
    ChannelId(String),
    Handle(String),
}

impl ChannelReference {
    /// Parse a channel URL, `@handle`, bare channel ID or free-form query.
    ///
    /// Legacy `/c/CustomName` URLs and anything else with a path become a
    /// handle-style query on the last path segment.
    pub fn parse(input: &str) -> Self {
        let text = input.trim();

        if text.starts_with("http") {
            if let Some(reference) = Self::from_url(text) {
                return reference;
            }
        }

        if let Some(handle) = text.strip_prefix('@') {
            return Self::Handle(handle.to_string());
        }

        if text.starts_with(CHANNEL_ID_PREFIX) && text.len() >= MIN_CHANNEL_ID_LEN {
            return Self::ChannelId(text.to_string());
        }

        Self::Handle(text.trim_start_matches('@').to_string())
    }

    fn from_url(text: &str) -> Option<Self> {
        let url = Url::parse(text).ok()?;
        // Segments come back percent-encoded; handles are matched on their decoded text
        let parts: Vec<String> = url
            .path_segments()?
            .filter(|p| !p.is_empty())
            .map(|p| urlencoding::decode(p).map_or_else(|_| p.to_string(), |d| d.into_owned()))
            .collect();

        match parts.as_slice() {
            [first, second, ..] if first.eq_ignore_ascii_case("channel") => {
                Some(Self::ChannelId(second.clone()))
            }
            [first, ..] if first.starts_with('@') => Some(Self::Handle(first[1..].to_string())),
            [.., last] => Some(Self::Handle(last.trim_start_matches('@').to_string())),
            [] => None,
        }
    }
}

/// Resolve user input to a canonical channel ID.
///
/// `Ok(None)` means no strategy found a channel; transport and API failures
/// are returned as errors.
pub async fn resolve_channel_id(client: &YouTubeClient, input: &str) -> Result<Option<String>> {
    let query = match ChannelReference::parse(input) {
        ChannelReference::ChannelId(id) => {
            debug!("Using literal channel ID {}", id);
            return Ok(Some(id));
        }
        ChannelReference::Handle(handle) => handle,
    };

    debug!("Searching for channel '{}'", query);
    if let Some(id) = client.search_channel(&query).await? {
        return Ok(Some(id));
    }

    debug!("Search found nothing, trying legacy username '{}'", query);
    if let Some(id) = client.channel_for_username(&query).await? {
        return Ok(Some(id));
    }

    warn!("Could not resolve channel for query '{}'", query);
    Ok(None)
}
