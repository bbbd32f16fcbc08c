//! CSV table IO with atomic tmp→rename rewrites

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lyricline_core::Record;

use crate::error::PersistError;

/// Column order of the lyrics table
pub const HEADER: [&str; 3] = ["artist", "song_title", "lyrics"];

/// Staging path for a rewrite: `scraped_lyrics.csv` → `scraped_lyrics.csv.tmp`
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load every row. The header must match [`HEADER`] exactly.
pub fn read_records(path: &Path) -> Result<Vec<Record>, PersistError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| PersistError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| PersistError::csv(path, e))?;
    if headers.iter().ne(HEADER) {
        return Err(PersistError::Header {
            path: path.to_path_buf(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    reader
        .deserialize::<Record>()
        .map(|row| row.map_err(|e| PersistError::csv(path, e)))
        .collect()
}

/// Rewrite the whole table: write `<path>.tmp`, fsync, rename over `path`.
///
/// A crash before the rename leaves the previous table intact; the stale tmp
/// file is removed by [`cleanup_stale_tmp`] on the next start.
pub fn write_records_atomic(path: &Path, records: &[Record]) -> Result<(), PersistError> {
    let tmp = tmp_path(path);
    let file = File::create(&tmp).map_err(|e| PersistError::io(&tmp, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    writer
        .write_record(HEADER)
        .map_err(|e| PersistError::csv(&tmp, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| PersistError::csv(&tmp, e))?;
    }

    let mut buf = writer
        .into_inner()
        .map_err(|e| PersistError::io(&tmp, e.into_error()))?;
    buf.flush().map_err(|e| PersistError::io(&tmp, e))?;
    buf.get_ref()
        .sync_all()
        .map_err(|e| PersistError::io(&tmp, e))?;
    drop(buf);

    fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))?;
    sync_parent_dir(path);
    Ok(())
}

/// Persist the rename itself. Not all platforms allow opening a directory, so failures are ignored.
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

/// Remove a `.tmp` left behind by a rewrite that crashed before its rename
pub fn cleanup_stale_tmp(path: &Path) -> Result<bool, PersistError> {
    let tmp = tmp_path(path);
    if !tmp.exists() {
        return Ok(false);
    }
    log::warn!("Removing stale tmp file: {}", tmp.display());
    fs::remove_file(&tmp).map_err(|e| PersistError::io(&tmp, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rec(artist: &str, title: &str, lyrics: &str) -> Record {
        Record {
            artist: artist.into(),
            song_title: title.into(),
            lyrics: lyrics.into(),
        }
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("out/scraped_lyrics.csv")),
            PathBuf::from("out/scraped_lyrics.csv.tmp")
        );
    }

    #[test]
    fn empty_table_has_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        write_records_atomic(&path, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "artist,song_title,lyrics\n"
        );
        assert!(read_records(&path).unwrap().is_empty());
    }

    #[test]
    fn multiline_lyrics_survive_quoting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        let rows = vec![
            rec("Nina Simone", "Feeling Good", "Birds flying high\nYou know how I feel"),
            rec("Queen", "Bohemian Rhapsody, Pt. \"1\"", "Is this the real life?"),
        ];
        write_records_atomic(&path, &rows).unwrap();

        assert_eq!(read_records(&path).unwrap(), rows);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn reads_file_written_by_other_tools() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        fs::write(
            &path,
            "artist,song_title,lyrics\nAdele,Hello,\"Hello, it's me\nI was wondering\"\n",
        )
        .unwrap();

        let rows = read_records(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].song_title, "Hello");
        assert_eq!(rows[0].lyrics, "Hello, it's me\nI was wondering");
    }

    #[test]
    fn wrong_header_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        fs::write(&path, "artist,title,text\nA,B,C\n").unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, PersistError::Header { .. }));
        assert!(err.to_string().contains("expected [artist,song_title,lyrics]"));
    }

    #[test]
    fn short_row_is_csv_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        fs::write(&path, "artist,song_title,lyrics\nA,B\n").unwrap();

        assert!(matches!(
            read_records(&path).unwrap_err(),
            PersistError::Csv { .. }
        ));
    }

    #[test]
    fn cleanup_removes_only_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lyrics.csv");
        write_records_atomic(&path, &[rec("A", "B", "C")]).unwrap();
        fs::write(tmp_path(&path), "partial").unwrap();

        assert!(cleanup_stale_tmp(&path).unwrap());
        assert!(!tmp_path(&path).exists());
        assert!(path.exists());
        assert!(!cleanup_stale_tmp(&path).unwrap());
    }
}
