//! Cardinalities of the lyrics table

use lyricline_core::Record;
use rustc_hash::FxHashSet;

/// Totals reported at the end of a run and by `lyricline stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub rows: usize,
    pub distinct_artists: usize,
    /// Distinct titles across all artists ("Hello" by two artists counts once)
    pub distinct_titles: usize,
    /// Rows whose (artist, song_title) already appeared earlier; 0 for a healthy table
    pub duplicate_keys: usize,
}

impl StoreSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut artists = FxHashSet::default();
        let mut titles = FxHashSet::default();
        let mut keys = FxHashSet::default();
        let mut duplicate_keys = 0;
        for r in records {
            artists.insert(r.artist.as_str());
            titles.insert(r.song_title.as_str());
            if !keys.insert(r.key()) {
                duplicate_keys += 1;
            }
        }
        Self {
            rows: records.len(),
            distinct_artists: artists.len(),
            distinct_titles: titles.len(),
            duplicate_keys,
        }
    }
}
