//! Genius client implementing [`LyricsSource`]

use std::time::Duration;

use lyricline_core::http::{build_client, get_text};
use lyricline_core::{ArtistResult, LyricsSource, Song, SourceError};
use reqwest::Url;

use crate::api::{self, ArtistInfo, SongInfo};
use crate::config::ClientConfig;
use crate::lyrics::{extract_lyrics, remove_section_headers};
use crate::rules::{SongRules, names_match};

const USER_AGENT: &str = concat!("lyricline/", env!("CARGO_PKG_VERSION"));

/// Base delay between transport retries, multiplied by the attempt number
const TRANSPORT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Blocking Genius client. One request at a time; no internal rate-limit handling.
pub struct GeniusClient {
    config: ClientConfig,
    http: reqwest::Client,
    rules: SongRules,
}

impl std::fmt::Debug for GeniusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeniusClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeniusClient {
    pub fn new(config: ClientConfig) -> Result<Self, SourceError> {
        let http = build_client(config.timeout, USER_AGENT)?;
        let rules = SongRules::new(&config.excluded_terms)
            .map_err(|e| SourceError::Decode(format!("invalid excluded term: {e}")))?;
        Ok(Self {
            config,
            http,
            rules,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET with retries on timeouts and 5xx. A 429 is returned immediately.
    fn get(&self, url: &str, authorized: bool) -> Result<String, SourceError> {
        let bearer = authorized.then_some(self.config.token.as_str());
        let mut attempt = 0u32;
        loop {
            match get_text(&self.http, url, bearer) {
                Err(e) if e.is_transient() && attempt < self.config.transport_retries => {
                    attempt += 1;
                    log::debug!(
                        "transport error ({e}), retry {attempt}/{}",
                        self.config.transport_retries
                    );
                    std::thread::sleep(TRANSPORT_RETRY_DELAY * attempt);
                }
                result => return result,
            }
        }
    }

    fn api_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, SourceError> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(&format!("{base}{path}"), params)
            .map_err(|e| SourceError::Decode(format!("invalid URL for {path}: {e}")))
    }

    /// Song hits for a free-text query
    fn search(&self, query: &str) -> Result<Vec<SongInfo>, SourceError> {
        let url = self.api_url("/search", &[("q", query)])?;
        api::parse_search(&self.get(url.as_str(), true)?)
    }

    fn artist_songs(&self, artist_id: u64, page: u32) -> Result<api::SongsPage, SourceError> {
        let per_page = self.config.per_page.to_string();
        let page = page.to_string();
        let url = self.api_url(
            &format!("/artists/{artist_id}/songs"),
            &[("sort", "popularity"), ("per_page", &per_page), ("page", &page)],
        )?;
        api::parse_songs_page(&self.get(url.as_str(), true)?)
    }

    /// Scrape lyrics from the song's public page
    fn lyrics(&self, song_url: &str) -> Result<Option<String>, SourceError> {
        let html = self.get(song_url, false)?;
        Ok(extract_lyrics(&html).map(|text| {
            if self.config.remove_section_headers {
                remove_section_headers(&text)
            } else {
                text
            }
        }))
    }

    /// Resolve an artist name through search hits.
    ///
    /// Only a name match counts; a search that merely returns songs by someone
    /// else means the artist is unknown.
    fn find_artist(&self, artist: &str) -> Result<Option<ArtistInfo>, SourceError> {
        let hits = self.search(artist)?;
        Ok(hits
            .into_iter()
            .map(|song| song.primary_artist)
            .find(|a| names_match(&a.name, artist)))
    }

    /// Lyrics for a listed song, honoring `skip_non_songs`. `None` means skip it.
    fn song_with_lyrics(&self, info: &SongInfo) -> Result<Option<Song>, SourceError> {
        if self.config.skip_non_songs && !self.rules.is_lyrics(info) {
            log::debug!("skipping non-song '{}'", info.title);
            return Ok(None);
        }
        match self.lyrics(&info.url)? {
            Some(text) => Ok(Some(Song::new(info.title.clone(), text))),
            None if self.config.skip_non_songs => {
                log::debug!("no lyrics on page for '{}'", info.title);
                Ok(None)
            }
            None => Ok(Some(Song::new(info.title.clone(), String::new()))),
        }
    }
}

impl LyricsSource for GeniusClient {
    /// `Ok(None)` unless some search hit's primary artist has the same cleaned
    /// name as `artist`; the top hit alone is never taken on trust.
    fn fetch_artist(
        &self,
        artist: &str,
        max_songs: usize,
    ) -> Result<Option<ArtistResult>, SourceError> {
        let Some(found) = self.find_artist(artist)? else {
            return Ok(None);
        };
        if found.name != artist {
            log::debug!("'{artist}' resolved to '{}' (id {})", found.name, found.id);
        }

        let mut songs = Vec::new();
        let mut page = Some(1);
        let mut downloads = 0usize;
        while let Some(p) = page.filter(|_| songs.len() < max_songs) {
            let listing = self.artist_songs(found.id, p)?;
            for info in &listing.songs {
                if songs.len() >= max_songs {
                    break;
                }
                // features, not the artist's own songs
                if info.primary_artist.id != found.id {
                    continue;
                }
                if self.config.skip_non_songs && !self.rules.is_lyrics(info) {
                    log::debug!("skipping non-song '{}'", info.title);
                    continue;
                }
                if downloads > 0 {
                    std::thread::sleep(self.config.page_delay);
                }
                downloads += 1;
                if let Some(song) = self.song_with_lyrics(info)? {
                    songs.push(song);
                }
            }
            page = listing.next_page;
        }

        log::debug!("{}: {} songs collected", found.name, songs.len());
        Ok(Some(ArtistResult {
            name: found.name,
            songs,
        }))
    }

    fn fetch_song(&self, title: &str, artist: &str) -> Result<Option<Song>, SourceError> {
        let hits = self.search(&format!("{title} {artist}"))?;
        let by_title = |s: &&SongInfo| names_match(&s.title, title);
        let pick = hits
            .iter()
            .filter(by_title)
            .find(|s| names_match(&s.primary_artist.name, artist))
            .or_else(|| hits.iter().find(by_title))
            .or_else(|| {
                hits.iter()
                    .find(|s| !self.config.skip_non_songs || self.rules.is_lyrics(s))
            });
        match pick {
            Some(info) => self.song_with_lyrics(info),
            None => Ok(None),
        }
    }
}
