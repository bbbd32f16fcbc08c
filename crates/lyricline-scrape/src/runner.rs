//! The scrape driver: one artist at a time, fetch, filter, dedup, persist

use std::time::Instant;

use lyricline_core::progress::bar_prefix;
use lyricline_core::{
    LyricsSource, ProgressContext, RemoteError, Sleeper, is_shutdown_requested,
    retry_with_backoff,
};
use lyricline_store::{DedupIndex, PersistError, Persister};

use crate::config::{Config, ConfigError};
use crate::filter::RecordFilter;
use crate::input::load_artists;
use crate::stats::RunSummary;

/// Errors that abort a run. Per-artist fetch failures never get here.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Persist(PersistError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Persist(e) => write!(f, "persist error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Persist(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PersistError> for RunError {
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}

/// What happened to one artist
enum ArtistOutcome {
    Added {
        fetched: usize,
        rejected: usize,
        duplicates: usize,
        added: usize,
    },
    NotFound,
    Failed(RemoteError),
}

/// Run until the artist list is exhausted or a shutdown signal arrives.
pub fn run<S: LyricsSource>(
    config: &Config,
    source: &S,
    progress: &ProgressContext,
    sleeper: &mut dyn Sleeper,
) -> Result<RunSummary, RunError> {
    run_until(config, source, progress, sleeper, is_shutdown_requested)
}

/// Like [`run`], with an explicit stop check polled before every artist.
pub fn run_until<S: LyricsSource>(
    config: &Config,
    source: &S,
    progress: &ProgressContext,
    sleeper: &mut dyn Sleeper,
    should_stop: impl Fn() -> bool,
) -> Result<RunSummary, RunError> {
    let start = Instant::now();

    let mut persister = Persister::load(&config.output_path)?;
    let mut seen = DedupIndex::from_records(persister.records());
    log::info!(
        "{} songs by {} artists already stored",
        seen.len(),
        seen.artist_count()
    );

    // a bad artist list must not leave a fresh table behind
    let artists = load_artists(&config.artists_path)?;
    persister.create()?;
    log::info!(
        "Scraping {} artists, up to {} songs each",
        artists.len(),
        config.items_per_artist
    );

    let filter = RecordFilter::new(config.min_lyrics_chars);
    let pb = progress.artist_bar(artists.len());
    let mut summary = RunSummary {
        artists_total: artists.len(),
        ..Default::default()
    };

    for (i, artist) in artists.iter().enumerate() {
        if should_stop() {
            log::warn!("Shutdown requested, stopping before '{artist}'");
            summary.interrupted = true;
            break;
        }
        pb.set_prefix(bar_prefix(artist));
        pb.set_message("fetching");

        let response = retry_with_backoff(artist, &config.backoff, &pb, sleeper, || {
            source.fetch_artist(artist, config.items_per_artist)
        });
        let outcome = match response {
            Ok(Some(result)) => {
                let fetched = result.songs.len();
                let records = filter.shape(artist, result);
                let rejected = fetched - records.len();
                let fresh: Vec<_> = records
                    .into_iter()
                    .filter(|r| seen.insert(&r.artist, &r.song_title))
                    .collect();
                let duplicates = fetched - rejected - fresh.len();
                let added = fresh.len();
                persister.append_and_flush(fresh)?;
                ArtistOutcome::Added {
                    fetched,
                    rejected,
                    duplicates,
                    added,
                }
            }
            Ok(None) => ArtistOutcome::NotFound,
            Err(e) => ArtistOutcome::Failed(e),
        };

        summary.artists_processed += 1;
        match outcome {
            ArtistOutcome::Added {
                fetched,
                rejected,
                duplicates,
                added,
            } => {
                summary.songs_fetched += fetched;
                summary.songs_rejected += rejected;
                summary.duplicates_skipped += duplicates;
                summary.records_added += added;
                log::debug!(
                    "{artist}: {fetched} fetched, {rejected} too short, {duplicates} already stored"
                );
                pb.set_message(format!("+{added} new, {} total", persister.len()));
                if !progress.is_tty() {
                    log::info!(
                        "[{}/{}] {artist}: +{added} new ({} total)",
                        i + 1,
                        artists.len(),
                        persister.len()
                    );
                }
            }
            ArtistOutcome::NotFound => {
                summary.artists_not_found += 1;
                log::warn!("[{}/{}] {artist}: not found", i + 1, artists.len());
            }
            ArtistOutcome::Failed(e) => {
                summary.artists_failed += 1;
                log::error!("[{}/{}] {artist}: {e}", i + 1, artists.len());
            }
        }
        pb.inc(1);
        sleeper.sleep(config.pace_delay);
    }
    pb.finish_and_clear();

    summary.store = persister.summary();
    summary.elapsed = start.elapsed();
    Ok(summary)
}
