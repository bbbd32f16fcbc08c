//! lyricline - incremental lyrics scraper for the Genius API
//!
//! Collects the most popular songs of every artist in a list, skips what an
//! earlier run already stored, and checkpoints the CSV table after each artist.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "lyricline")]
#[command(about = "Incremental lyrics scraper for the Genius API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./lyricline.toml or ~/.config/lyricline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Genius API client access token
    #[arg(long, global = true, env = "REMOTE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Retries after a rate-limited request
    #[arg(long, global = true, env = "MAX_RETRIES")]
    max_retries: Option<u32>,

    /// Seconds before the first rate-limit retry (doubled on each further retry)
    #[arg(long, global = true, env = "INITIAL_BACKOFF_SECONDS")]
    initial_backoff: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape lyrics for every artist in the list, resuming the output table
    Scrape(cmd::scrape::ScrapeCmd),
    /// Look up a single song and print its lyrics
    Song(cmd::song::SongCmd),
    /// Summarize an existing lyrics table
    Stats(cmd::stats::StatsCmd),
    /// Show current configuration
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let progress = lyricline_core::ProgressContext::new();

    // TTY: warn unless --debug, the artist bar shows activity.
    // non-TTY: info, logs are the only progress indicator.
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    lyricline_core::init_logging(
        lyricline_core::Verbosity::from_flags(quiet, cli.debug),
        multi,
    );

    let config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Config file values, overridden by env vars and flags
    let globals = cmd::Globals {
        token: cli.token.or_else(|| config.genius.token.clone()),
        max_retries: cli.max_retries.unwrap_or(config.scrape.max_retries),
        initial_backoff_secs: cli
            .initial_backoff
            .unwrap_or(config.scrape.initial_backoff_secs),
    };

    match cli.command {
        Command::Scrape(args) => cmd::scrape::run(args, &globals, &config, &progress),
        Command::Song(args) => cmd::song::run(args, &globals, &config),
        Command::Stats(args) => cmd::stats::run(args, &config),
        Command::Config => {
            cmd::print_config(&globals, &config);
            Ok(ExitCode::SUCCESS)
        }
    }
}
