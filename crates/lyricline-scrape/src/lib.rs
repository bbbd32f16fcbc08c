//! lyricline-scrape: the incremental scrape pipeline
//!
//! Reads an artist list, fetches each artist's songs through a
//! [`LyricsSource`](lyricline_core::LyricsSource) with rate-limit backoff,
//! drops short and already-stored songs, and flushes the table after every
//! artist so a rerun resumes where the last one stopped.
//!
//! ```ignore
//! use lyricline_scrape::{Config, ScrapeArgs, run};
//!
//! let config = Config::try_from(ScrapeArgs {
//!     token: Some(token),
//!     ..Default::default()
//! })?;
//! let summary = run(&config, &client, &progress, &mut ThreadSleeper)?;
//! ```

pub mod config;
pub mod filter;
pub mod input;
pub mod runner;
pub mod stats;

pub use config::{Config, ConfigError, ScrapeArgs};
pub use filter::RecordFilter;
pub use input::load_artists;
pub use runner::{RunError, run, run_until};
pub use stats::{RunSummary, format_store_table};
