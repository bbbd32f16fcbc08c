//! Genius client configuration

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.genius.com";

/// Immutable settings fixed when the client is built.
#[derive(Clone)]
pub struct ClientConfig {
    /// Client access token (sent as a bearer token)
    pub token: String,
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts on timeouts and 5xx responses (not on 429)
    pub transport_retries: u32,
    /// Pause between consecutive song page downloads
    pub page_delay: Duration,
    /// Songs per page when listing an artist (API max is 50)
    pub per_page: u32,
    /// Title fragments that mark a song as unwanted, e.g. `(Remix)`
    pub excluded_terms: Vec<String>,
    /// Drop `[Verse 1]`-style headers from lyrics
    pub remove_section_headers: bool,
    /// Skip tracklists, credits, instrumentals and songs without lyrics
    pub skip_non_songs: bool,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            transport_retries: 3,
            page_delay: Duration::from_millis(500),
            per_page: 20,
            excluded_terms: vec!["(Remix)".to_string(), "(Live)".to_string()],
            remove_section_headers: true,
            skip_non_songs: true,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("transport_retries", &self.transport_retries)
            .field("page_delay", &self.page_delay)
            .field("per_page", &self.per_page)
            .field("excluded_terms", &self.excluded_terms)
            .field("remove_section_headers", &self.remove_section_headers)
            .field("skip_non_songs", &self.skip_non_songs)
            .finish()
    }
}
