//! Artist list loading

use std::path::Path;

use crate::config::ConfigError;

/// Artist names from a newline-delimited list, in file order.
///
/// Lines are trimmed and blank lines skipped. Duplicates are kept; the dedup
/// index makes a repeated artist a no-op.
pub fn load_artists(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputList {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let artists = parse_artists(&content);
    if artists.is_empty() {
        return Err(ConfigError::InputList {
            path: path.to_path_buf(),
            reason: "no artist names".to_string(),
        });
    }
    Ok(artists)
}

fn parse_artists(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
