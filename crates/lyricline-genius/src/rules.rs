//! Name matching and "is this actually a song" rules

use std::sync::LazyLock;

use regex::Regex;

use crate::api::SongInfo;

/// Titles Genius uses for pages that are not song lyrics
const NON_SONG_TERMS: &[&str] = &[
    "tracklist",
    "track list",
    "album art",
    "album artwork",
    "liner notes",
    "booklet",
    "credits",
    "interview",
    "skit",
    "instrumental",
    "setlist",
];

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]").expect("valid punctuation pattern"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{200b}]+").expect("valid whitespace pattern"));

/// Normalize for comparison: lowercase, ASCII punctuation dropped, whitespace collapsed.
pub fn clean_str(s: &str) -> String {
    let stripped = PUNCTUATION.replace_all(s, "").to_lowercase();
    SPACES.replace_all(&stripped, " ").trim().to_string()
}

/// Whole-word, case-insensitive pattern for a cleaned term. `None` if nothing is left.
fn term_pattern(term: &str) -> Option<Result<Regex, regex::Error>> {
    let cleaned = clean_str(term);
    if cleaned.is_empty() {
        return None;
    }
    let words: Vec<String> = cleaned.split(' ').map(regex::escape).collect();
    Some(Regex::new(&format!(r"(?i)\b{}\b", words.join(r"\s+"))))
}

/// Song filtering rules derived from the client config.
#[derive(Debug, Clone)]
pub struct SongRules {
    excluded: Vec<Regex>,
}

impl SongRules {
    /// Built-in non-song terms plus the configured `excluded_terms`.
    pub fn new(excluded_terms: &[String]) -> Result<Self, regex::Error> {
        let excluded = NON_SONG_TERMS
            .iter()
            .copied()
            .chain(excluded_terms.iter().map(String::as_str))
            .filter_map(term_pattern)
            .collect::<Result<_, _>>()?;
        Ok(Self { excluded })
    }

    /// Title contains an excluded term (whole-word, case-insensitive).
    pub fn is_excluded_title(&self, title: &str) -> bool {
        let cleaned = clean_str(title);
        self.excluded.iter().any(|re| re.is_match(&cleaned))
    }

    /// Complete lyrics, not instrumental, not an excluded title.
    pub fn is_lyrics(&self, song: &SongInfo) -> bool {
        song.lyrics_state == "complete"
            && !song.instrumental
            && !self.is_excluded_title(&song.title)
    }
}

/// Same artist or title, ignoring case and punctuation.
pub fn names_match(a: &str, b: &str) -> bool {
    clean_str(a) == clean_str(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ArtistInfo;

    fn song(title: &str, state: &str, instrumental: bool) -> SongInfo {
        SongInfo {
            id: 1,
            title: title.into(),
            url: "https://genius.com/x".into(),
            lyrics_state: state.into(),
            instrumental,
            primary_artist: ArtistInfo {
                id: 1,
                name: "X".into(),
            },
        }
    }

    fn rules() -> SongRules {
        SongRules::new(&["(Remix)".to_string(), "(Live)".to_string()]).unwrap()
    }

    #[test]
    fn clean_str_normalizes() {
        assert_eq!(clean_str("  Guns N' Roses "), "guns n roses");
        assert_eq!(clean_str("AC/DC"), "acdc");
        assert_eq!(clean_str("Sigur\u{200b}Rós"), "sigur rós");
    }

    #[test]
    fn names_match_ignores_case_and_punctuation() {
        assert!(names_match("Guns N' Roses", "guns n roses"));
        assert!(!names_match("Adele", "Adel"));
    }

    #[test]
    fn excluded_terms_match_whole_words() {
        let r = rules();
        assert!(r.is_excluded_title("Hello (Live)"));
        assert!(r.is_excluded_title("Hello - Remix"));
        assert!(r.is_excluded_title("25 Tracklist"));
        assert!(r.is_excluded_title("Album Credits"));
        assert!(!r.is_excluded_title("Stayin' Alive"));
        assert!(!r.is_excluded_title("Hello"));
        assert!(r.is_excluded_title("Bohemian Rhapsody - LIVE at Wembley"));
        assert!(r.is_excluded_title("Tour Track  List"));
        assert!(!r.is_excluded_title("Remixed Feelings"));
    }

    #[test]
    fn blank_and_regex_like_terms() {
        let r = SongRules::new(&["()".to_string(), "a+b".to_string()]).unwrap();
        assert!(r.is_excluded_title("A+B"));
        assert!(!r.is_excluded_title("aaab"));
        assert!(!r.is_excluded_title("Hello"));
    }

    #[test]
    fn is_lyrics_checks_state_and_instrumental() {
        let r = rules();
        assert!(r.is_lyrics(&song("Hello", "complete", false)));
        assert!(!r.is_lyrics(&song("Hello", "unreleased", false)));
        assert!(!r.is_lyrics(&song("Hello", "complete", true)));
        assert!(!r.is_lyrics(&song("Hello (Live)", "complete", false)));
    }
}
