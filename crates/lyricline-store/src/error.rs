//! Errors from reading or rewriting the lyrics table

use std::path::PathBuf;

/// The store could not be loaded or rewritten. Always fatal for a run.
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem failure (create, fsync, rename)
    Io { path: PathBuf, source: std::io::Error },
    /// Malformed CSV or a row that does not match [`Record`](lyricline_core::Record)
    Csv { path: PathBuf, source: csv::Error },
    /// Header row differs from `artist,song_title,lyrics`
    Header { path: PathBuf, found: Vec<String> },
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: CSV: {source}", path.display()),
            Self::Header { path, found } => write!(
                f,
                "{}: unexpected header [{}], expected [{}]",
                path.display(),
                found.join(","),
                crate::table::HEADER.join(",")
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Header { .. } => None,
        }
    }
}

impl PersistError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
