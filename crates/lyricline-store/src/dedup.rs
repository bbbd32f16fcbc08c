//! In-memory index of (artist, song_title) pairs already in the store

use lyricline_core::Record;
use rustc_hash::{FxHashMap, FxHashSet};

/// O(1) lookup of scraped songs, keyed by artist then title.
///
/// Grows monotonically for the lifetime of a run; rebuilt from the store on the next one.
#[derive(Debug, Default)]
pub struct DedupIndex {
    by_artist: FxHashMap<String, FxHashSet<String>>,
    len: usize,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted rows; duplicate rows in the input collapse to one key.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut index = Self::new();
        for r in records {
            index.insert(&r.artist, &r.song_title);
        }
        index
    }

    pub fn contains(&self, artist: &str, title: &str) -> bool {
        self.by_artist
            .get(artist)
            .is_some_and(|titles| titles.contains(title))
    }

    /// Check-and-add. Returns `true` if the pair was not seen before.
    pub fn insert(&mut self, artist: &str, title: &str) -> bool {
        let inserted = match self.by_artist.get_mut(artist) {
            Some(titles) => !titles.contains(title) && titles.insert(title.to_owned()),
            None => {
                let mut titles = FxHashSet::default();
                titles.insert(title.to_owned());
                self.by_artist.insert(artist.to_owned(), titles);
                true
            }
        };
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Number of distinct pairs
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct artists with at least one song
    pub fn artist_count(&self) -> usize {
        self.by_artist.len()
    }
}
