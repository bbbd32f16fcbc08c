//! Genius REST API response shapes

use lyricline_core::SourceError;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Every API response wraps its payload in `{"meta": ..., "response": ...}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtistInfo {
    pub id: u64,
    pub name: String,
}

/// Song as listed by `/search` and `/artists/{id}/songs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongInfo {
    pub id: u64,
    pub title: String,
    /// Public page holding the lyrics
    pub url: String,
    #[serde(default)]
    pub lyrics_state: String,
    #[serde(default)]
    pub instrumental: bool,
    pub primary_artist: ArtistInfo,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "type")]
    kind: String,
    result: serde_json::Value,
}

/// One page of an artist's songs
#[derive(Debug, Deserialize)]
pub struct SongsPage {
    pub songs: Vec<SongInfo>,
    pub next_page: Option<u32>,
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, SourceError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|env| env.response)
        .map_err(|e| SourceError::Decode(format!("{what}: {e}")))
}

/// Song hits of a `/search` response, in ranking order. Non-song hits are skipped.
pub fn parse_search(body: &str) -> Result<Vec<SongInfo>, SourceError> {
    let resp: SearchResponse = decode(body, "search")?;
    let mut songs = Vec::with_capacity(resp.hits.len());
    for hit in resp.hits.into_iter().filter(|h| h.kind == "song") {
        match serde_json::from_value::<SongInfo>(hit.result) {
            Ok(song) => songs.push(song),
            Err(e) => log::debug!("Skipping malformed search hit: {e}"),
        }
    }
    Ok(songs)
}

pub fn parse_songs_page(body: &str) -> Result<SongsPage, SourceError> {
    decode(body, "artist songs")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = r#"{
        "meta": {"status": 200},
        "response": {"hits": [
            {"index": "song", "type": "song", "result": {
                "id": 378195, "title": "Hello", "url": "https://genius.com/Adele-hello-lyrics",
                "lyrics_state": "complete",
                "primary_artist": {"id": 2300, "name": "Adele", "url": "https://genius.com/artists/Adele"}
            }},
            {"index": "album", "type": "album", "result": {"id": 1, "name": "25"}},
            {"index": "song", "type": "song", "result": {"id": 7}}
        ]}
    }"#;

    #[test]
    fn search_keeps_only_well_formed_songs() {
        let songs = parse_search(SEARCH).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Hello");
        assert_eq!(songs[0].primary_artist.id, 2300);
        assert!(!songs[0].instrumental);
    }

    #[test]
    fn songs_page_with_next() {
        let body = r#"{"meta":{"status":200},"response":{"songs":[
            {"id": 1, "title": "Skyfall", "url": "https://genius.com/a", "lyrics_state": "complete",
             "instrumental": false, "primary_artist": {"id": 2300, "name": "Adele"}}
        ],"next_page":2}}"#;
        let page = parse_songs_page(body).unwrap();
        assert_eq!(page.songs.len(), 1);
        assert_eq!(page.next_page, Some(2));
    }

    #[test]
    fn songs_page_last() {
        let body = r#"{"meta":{"status":200},"response":{"songs":[],"next_page":null}}"#;
        let page = parse_songs_page(body).unwrap();
        assert!(page.songs.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = parse_search("<html>").unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
        assert!(!err.is_rate_limited());
    }
}
