//! Scrape subcommand - fetch lyrics for an artist list into the CSV table

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use lyricline_core::{ProgressContext, ThreadSleeper, install_signal_handlers};
use lyricline_genius::GeniusClient;
use lyricline_scrape::ScrapeArgs;

use super::Globals;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ScrapeCmd {
    /// Newline-delimited artist list
    #[arg(short, long)]
    pub artists: Option<PathBuf>,

    /// Output CSV table (created if missing, resumed otherwise)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Songs to fetch per artist, most popular first
    #[arg(short = 'n', long, env = "ITEMS_PER_GROUP")]
    pub items_per_artist: Option<usize>,

    /// Seconds to wait after every artist
    #[arg(long, env = "PACE_DELAY_SECONDS")]
    pub pace_delay: Option<f64>,

    /// Minimum lyrics length in characters
    #[arg(long)]
    pub min_lyrics_chars: Option<usize>,
}

impl ScrapeCmd {
    /// Merge with the config file; flags and env vars win.
    fn into_scrape_args(self, globals: &Globals, config: &Config) -> ScrapeArgs {
        ScrapeArgs {
            token: globals.token.clone(),
            artists: self.artists.unwrap_or_else(|| config.paths.artists.clone()),
            output: self.output.unwrap_or_else(|| config.paths.output.clone()),
            items_per_artist: self
                .items_per_artist
                .unwrap_or(config.scrape.items_per_artist),
            pace_delay_secs: self.pace_delay.unwrap_or(config.scrape.pace_delay_secs),
            initial_backoff_secs: globals.initial_backoff_secs,
            max_retries: globals.max_retries,
            min_lyrics_chars: self
                .min_lyrics_chars
                .unwrap_or(config.scrape.min_lyrics_chars),
        }
    }
}

pub fn run(
    args: ScrapeCmd,
    globals: &Globals,
    config: &Config,
    progress: &ProgressContext,
) -> Result<ExitCode> {
    let scrape_config = lyricline_scrape::Config::try_from(args.into_scrape_args(globals, config))?;
    log::debug!("{scrape_config:?}");

    let client = GeniusClient::new(config.genius.client_config(scrape_config.token.clone()))
        .context("Failed to build HTTP client")?;

    install_signal_handlers().context("Failed to install signal handlers")?;

    let summary = lyricline_scrape::run(&scrape_config, &client, progress, &mut ThreadSleeper)?;
    if progress.is_tty() {
        summary.print();
    } else {
        summary.log();
    }

    if summary.interrupted {
        log::warn!("Interrupted; rerun to continue with the remaining artists");
        return Ok(ExitCode::from(130));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> Globals {
        Globals {
            token: Some("t".into()),
            max_retries: 2,
            initial_backoff_secs: 3.0,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let mut config = Config::default();
        config.scrape.items_per_artist = 10;
        config.paths.output = PathBuf::from("from_file.csv");

        let cmd = ScrapeCmd {
            artists: None,
            output: Some(PathBuf::from("from_flag.csv")),
            items_per_artist: None,
            pace_delay: Some(0.0),
            min_lyrics_chars: None,
        };
        let args = cmd.into_scrape_args(&globals(), &config);
        assert_eq!(args.output, PathBuf::from("from_flag.csv"));
        assert_eq!(args.items_per_artist, 10);
        assert_eq!(args.pace_delay_secs, 0.0);
        assert_eq!(args.max_retries, 2);
        assert_eq!(args.initial_backoff_secs, 3.0);
        assert_eq!(args.artists, config.paths.artists);
    }
}
