//! Genius adapter for lyricline
//!
//! Resolves artists through the Genius search API, lists their songs by
//! popularity, and scrapes lyrics from the public song pages.

pub mod api;
pub mod client;
pub mod config;
pub mod lyrics;
pub mod rules;

pub use client::GeniusClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use lyrics::{extract_lyrics, remove_section_headers};
