//! Song subcommand - single lookup, printed to stdout

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::ProgressBar;
use lyricline_core::{LyricsSource, ThreadSleeper, retry_with_backoff};
use lyricline_genius::GeniusClient;
use lyricline_scrape::ScrapeArgs;

use super::Globals;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct SongCmd {
    /// Artist name
    #[arg(short, long)]
    pub artist: String,

    /// Song title
    #[arg(short, long)]
    pub title: String,
}

pub fn run(args: SongCmd, globals: &Globals, config: &Config) -> Result<ExitCode> {
    // same token and backoff validation as a scrape run
    let checked = lyricline_scrape::Config::try_from(ScrapeArgs {
        token: globals.token.clone(),
        initial_backoff_secs: globals.initial_backoff_secs,
        max_retries: globals.max_retries,
        ..Default::default()
    })?;

    let client = GeniusClient::new(config.genius.client_config(checked.token))
        .context("Failed to build HTTP client")?;

    let label = format!("{} - {}", args.artist, args.title);
    let song = retry_with_backoff(
        &label,
        &checked.backoff,
        &ProgressBar::hidden(),
        &mut ThreadSleeper,
        || client.fetch_song(&args.title, &args.artist),
    )
    .with_context(|| format!("Lookup failed for {label}"))?;

    match song {
        Some(song) => {
            println!("{}\n\n{}", song.title, song.lyrics.trim());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            log::warn!("No song found for {label}");
            Ok(ExitCode::from(1))
        }
    }
}
