//! Song to record shaping

use lyricline_core::{ArtistResult, Record};

/// Trims songs and drops those with too little lyrics text.
#[derive(Debug, Clone, Copy)]
pub struct RecordFilter {
    /// Minimum trimmed lyrics length, in chars
    pub min_lyrics_chars: usize,
}

impl RecordFilter {
    pub fn new(min_lyrics_chars: usize) -> Self {
        Self { min_lyrics_chars }
    }

    /// Records for one artist, in source order.
    ///
    /// Rows carry `artist` as given in the input list, not the source's spelling.
    pub fn shape(&self, artist: &str, result: ArtistResult) -> Vec<Record> {
        result
            .songs
            .into_iter()
            .filter_map(|song| {
                let lyrics = song.lyrics.trim();
                if lyrics.chars().count() < self.min_lyrics_chars {
                    log::debug!("{artist}: dropping '{}' (lyrics too short)", song.title.trim());
                    return None;
                }
                Some(Record {
                    artist: artist.to_string(),
                    song_title: song.title.trim().to_string(),
                    lyrics: lyrics.to_string(),
                })
            })
            .collect()
    }
}
