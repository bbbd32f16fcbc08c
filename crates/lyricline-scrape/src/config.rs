//! Scrape run configuration

use std::path::PathBuf;
use std::time::Duration;

use lyricline_core::BackoffPolicy;

pub const DEFAULT_ARTISTS_PATH: &str = "artists.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "scraped_lyrics.csv";
pub const DEFAULT_ITEMS_PER_ARTIST: usize = 25;
pub const DEFAULT_PACE_DELAY_SECS: f64 = 1.5;
pub const DEFAULT_INITIAL_BACKOFF_SECS: f64 = 10.0;
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_MIN_LYRICS_CHARS: usize = 20;

/// Fatal problems detected before the first artist is processed.
#[derive(Debug)]
pub enum ConfigError {
    /// No API token from flag, environment, or config file
    MissingToken,
    /// A numeric setting is out of range
    Invalid { field: &'static str, reason: String },
    /// Artist list missing, unreadable, or without a single name
    InputList { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(
                f,
                "missing API token (set REMOTE_API_TOKEN, --token, or genius.token in the config file)"
            ),
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::InputList { path, reason } => {
                write!(f, "artist list {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// CLI-facing arguments for the scrape command (plain struct, no clap derive).
#[derive(Debug, Clone)]
pub struct ScrapeArgs {
    pub token: Option<String>,
    pub artists: PathBuf,
    pub output: PathBuf,
    pub items_per_artist: usize,
    pub pace_delay_secs: f64,
    pub initial_backoff_secs: f64,
    pub max_retries: u32,
    pub min_lyrics_chars: usize,
}

impl Default for ScrapeArgs {
    fn default() -> Self {
        Self {
            token: None,
            artists: PathBuf::from(DEFAULT_ARTISTS_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            items_per_artist: DEFAULT_ITEMS_PER_ARTIST,
            pace_delay_secs: DEFAULT_PACE_DELAY_SECS,
            initial_backoff_secs: DEFAULT_INITIAL_BACKOFF_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            min_lyrics_chars: DEFAULT_MIN_LYRICS_CHARS,
        }
    }
}

/// Validated runtime configuration for a scrape run
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub artists_path: PathBuf,
    pub output_path: PathBuf,
    pub items_per_artist: usize,
    /// Wait after every artist, whatever its outcome
    pub pace_delay: Duration,
    pub backoff: BackoffPolicy,
    pub min_lyrics_chars: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("artists_path", &self.artists_path)
            .field("output_path", &self.output_path)
            .field("items_per_artist", &self.items_per_artist)
            .field("pace_delay", &self.pace_delay)
            .field("backoff", &self.backoff)
            .field("min_lyrics_chars", &self.min_lyrics_chars)
            .finish()
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::Invalid {
        field,
        reason: format!("expected a non-negative number of seconds, got {value}"),
    })
}

impl TryFrom<ScrapeArgs> for Config {
    type Error = ConfigError;

    fn try_from(args: ScrapeArgs) -> Result<Self, Self::Error> {
        let token = args
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        if args.items_per_artist == 0 {
            return Err(ConfigError::Invalid {
                field: "items_per_artist",
                reason: "must be at least 1".to_string(),
            });
        }
        let pace_delay = seconds("pace_delay_secs", args.pace_delay_secs)?;
        let initial_backoff = seconds("initial_backoff_secs", args.initial_backoff_secs)?;

        Ok(Self {
            token,
            artists_path: args.artists,
            output_path: args.output,
            items_per_artist: args.items_per_artist,
            pace_delay,
            backoff: BackoffPolicy::new(args.max_retries, initial_backoff),
            min_lyrics_chars: args.min_lyrics_chars,
        })
    }
}
