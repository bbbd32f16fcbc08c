//! Contract for a remote lyrics provider

use crate::error::SourceError;
use crate::record::{ArtistResult, Song};

/// A rate-limited remote catalogue of artists and songs.
///
/// Implementations make a single attempt per call; retrying on rate limits is
/// the caller's job (see [`crate::retry::retry_with_backoff`]).
pub trait LyricsSource {
    /// Resolve `artist` and collect up to `max_songs` of its songs, most popular first.
    ///
    /// `Ok(None)` means the source has no such artist, which is not an error.
    /// Implementations may also answer `Ok(None)` when the closest match carries a
    /// different name (a misspelling, a near-miss), rather than guessing.
    fn fetch_artist(
        &self,
        artist: &str,
        max_songs: usize,
    ) -> Result<Option<ArtistResult>, SourceError>;

    /// Look up a single song by title and artist.
    fn fetch_song(&self, title: &str, artist: &str) -> Result<Option<Song>, SourceError>;
}

impl<S: LyricsSource + ?Sized> LyricsSource for &S {
    fn fetch_artist(
        &self,
        artist: &str,
        max_songs: usize,
    ) -> Result<Option<ArtistResult>, SourceError> {
        (**self).fetch_artist(artist, max_songs)
    }

    fn fetch_song(&self, title: &str, artist: &str) -> Result<Option<Song>, SourceError> {
        (**self).fetch_song(title, artist)
    }
}
