//! Stats subcommand - summarize a lyrics table without touching it

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use lyricline_scrape::format_store_table;
use lyricline_store::{StoreSummary, read_records};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StatsCmd {
    /// CSV table to summarize (default: paths.output from the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: StatsCmd, config: &Config) -> Result<ExitCode> {
    let path = args.output.unwrap_or_else(|| config.paths.output.clone());
    anyhow::ensure!(path.exists(), "No lyrics table at {}", path.display());

    let records =
        read_records(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let summary = StoreSummary::from_records(&records);
    println!("{}", format_store_table(&summary));

    if summary.duplicate_keys > 0 {
        log::warn!(
            "{} rows repeat an (artist, song_title) pair already in the table",
            summary.duplicate_keys
        );
    }
    Ok(ExitCode::SUCCESS)
}
