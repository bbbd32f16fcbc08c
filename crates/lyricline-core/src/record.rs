//! Lyrics domain types shared by the adapter, filter and store

use serde::{Deserialize, Serialize};

/// One song as returned by a lyrics source, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub lyrics: String,
}

impl Song {
    pub fn new(title: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lyrics: lyrics.into(),
        }
    }
}

/// An artist resolved by the source plus its songs in source ranking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistResult {
    /// Canonical name as spelled by the source (may differ from the query)
    pub name: String,
    pub songs: Vec<Song>,
}

/// A persisted row. `(artist, song_title)` is unique across the store.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub artist: String,
    pub song_title: String,
    pub lyrics: String,
}

impl Record {
    /// Dedup key
    pub fn key(&self) -> (&str, &str) {
        (&self.artist, &self.song_title)
    }
}
