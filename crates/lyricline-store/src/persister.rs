//! Incremental persistence: one full, atomic rewrite per artist batch

use std::path::{Path, PathBuf};

use lyricline_core::Record;

use crate::error::PersistError;
use crate::summary::StoreSummary;
use crate::table;

/// The whole lyrics table, held in memory and rewritten after every batch.
///
/// A batch is either fully visible on disk after [`append_and_flush`](Self::append_and_flush)
/// returns, or not at all.
#[derive(Debug)]
pub struct Persister {
    path: PathBuf,
    rows: Vec<Record>,
}

impl Persister {
    /// Load the table at `path`, or create it with just a header row.
    ///
    /// Removes a stale `.tmp` from an interrupted rewrite first.
    pub fn open(path: &Path) -> Result<Self, PersistError> {
        let mut persister = Self::load(path)?;
        persister.create()?;
        Ok(persister)
    }

    /// Like [`open`](Self::open), but an absent table stays absent until
    /// [`create`](Self::create) or the first non-empty flush.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        table::cleanup_stale_tmp(path)?;

        let rows = if path.exists() {
            let rows = table::read_records(path)?;
            log::info!("Loaded {} existing rows from {}", rows.len(), path.display());
            rows
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            rows,
        })
    }

    /// Write a header-only table if none exists yet.
    pub fn create(&mut self) -> Result<(), PersistError> {
        if self.path.exists() {
            return Ok(());
        }
        self.ensure_parent()?;
        table::write_records_atomic(&self.path, &self.rows)?;
        log::info!("No existing table found, created {}", self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
        }
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append `batch` and rewrite the table. Returns the new row count.
    ///
    /// An empty batch is a no-op. On failure the in-memory rows are rolled back
    /// so they keep matching what is on disk.
    pub fn append_and_flush(&mut self, batch: Vec<Record>) -> Result<usize, PersistError> {
        if batch.is_empty() {
            return Ok(self.rows.len());
        }
        self.ensure_parent()?;
        let before = self.rows.len();
        self.rows.extend(batch);
        if let Err(e) = table::write_records_atomic(&self.path, &self.rows) {
            self.rows.truncate(before);
            return Err(e);
        }
        log::debug!(
            "{}: flushed {} new rows ({} total)",
            self.path.display(),
            self.rows.len() - before,
            self.rows.len()
        );
        Ok(self.rows.len())
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary::from_records(&self.rows)
    }
}
