//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use lyricline_genius::ClientConfig;
use lyricline_scrape::config as defaults;
use serde::Deserialize;

/// File-level configuration for lyricline. CLI flags and env vars override it.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub genius: GeniusConfig,
    pub scrape: ScrapeConfig,
    pub paths: PathsConfig,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeniusConfig {
    #[serde(deserialize_with = "deserialize_env_var")]
    pub token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub transport_retries: u32,
    pub page_delay_ms: u64,
    pub per_page: u32,
    pub excluded_terms: Vec<String>,
    pub remove_section_headers: bool,
    pub skip_non_songs: bool,
}

impl Default for GeniusConfig {
    fn default() -> Self {
        let client = ClientConfig::new(String::new());
        Self {
            token: None,
            base_url: client.base_url,
            timeout_secs: client.timeout.as_secs(),
            transport_retries: client.transport_retries,
            page_delay_ms: client.page_delay.as_millis() as u64,
            per_page: client.per_page,
            excluded_terms: client.excluded_terms,
            remove_section_headers: client.remove_section_headers,
            skip_non_songs: client.skip_non_songs,
        }
    }
}

impl std::fmt::Debug for GeniusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeniusConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("transport_retries", &self.transport_retries)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("per_page", &self.per_page)
            .field("excluded_terms", &self.excluded_terms)
            .field("remove_section_headers", &self.remove_section_headers)
            .field("skip_non_songs", &self.skip_non_songs)
            .finish()
    }
}

impl GeniusConfig {
    /// Client settings for `token`, everything else from this section.
    pub fn client_config(&self, token: String) -> ClientConfig {
        ClientConfig {
            token,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            transport_retries: self.transport_retries,
            page_delay: Duration::from_millis(self.page_delay_ms),
            per_page: self.per_page,
            excluded_terms: self.excluded_terms.clone(),
            remove_section_headers: self.remove_section_headers,
            skip_non_songs: self.skip_non_songs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub items_per_artist: usize,
    pub pace_delay_secs: f64,
    pub initial_backoff_secs: f64,
    pub max_retries: u32,
    pub min_lyrics_chars: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            items_per_artist: defaults::DEFAULT_ITEMS_PER_ARTIST,
            pace_delay_secs: defaults::DEFAULT_PACE_DELAY_SECS,
            initial_backoff_secs: defaults::DEFAULT_INITIAL_BACKOFF_SECS,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            min_lyrics_chars: defaults::DEFAULT_MIN_LYRICS_CHARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub artists: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artists: PathBuf::from(defaults::DEFAULT_ARTISTS_PATH),
            output: PathBuf::from(defaults::DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./lyricline.toml (current directory)
    /// 2. ~/.config/lyricline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("lyricline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "lyricline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.genius.timeout_secs, 15);
        assert_eq!(config.genius.page_delay_ms, 500);
        assert_eq!(config.scrape.items_per_artist, 25);
        assert_eq!(config.scrape.max_retries, 5);
        assert_eq!(config.paths.output, PathBuf::from("scraped_lyrics.csv"));
        assert!(config.genius.token.is_none());
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("LYRICLINE_TEST_TOKEN", "test_value");
        assert_eq!(
            expand_env_var("${LYRICLINE_TEST_TOKEN}"),
            Some("test_value".to_string())
        );
        std::env::remove_var("LYRICLINE_TEST_TOKEN");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[genius]
token = "abc"
page_delay_ms = 250
excluded_terms = ["(Remix)", "(Live)", "(Acoustic)"]
skip_non_songs = false

[scrape]
items_per_artist = 10
pace_delay_secs = 0.5

[paths]
artists = "input/artists.txt"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.genius.token.as_deref(), Some("abc"));
        assert_eq!(config.genius.timeout_secs, 15);
        assert_eq!(config.genius.excluded_terms.len(), 3);
        assert!(!config.genius.skip_non_songs);
        assert_eq!(config.scrape.items_per_artist, 10);
        assert_eq!(config.scrape.initial_backoff_secs, 10.0);
        assert_eq!(config.paths.artists, PathBuf::from("input/artists.txt"));
        assert_eq!(config.paths.output, PathBuf::from("scraped_lyrics.csv"));

        let client = config.genius.client_config("t".into());
        assert_eq!(client.page_delay, Duration::from_millis(250));
        assert!(!client.skip_non_songs);
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyricline.toml");
        std::fs::write(&path, "[scrape\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err}").contains("lyricline.toml"));
    }

    #[test]
    fn debug_redacts_token() {
        let config: Config = toml::from_str("[genius]\ntoken = \"hunter2\"").unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
