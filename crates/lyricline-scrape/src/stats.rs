//! Run statistics and the end-of-run report

use std::time::Duration;

use comfy_table::{Attribute, Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use lyricline_core::fmt_num;
use lyricline_store::StoreSummary;

/// Counters for one scrape run plus the table state at the end.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Artists in the input list
    pub artists_total: usize,
    /// Artists whose fetch was attempted
    pub artists_processed: usize,
    /// Source has no such artist
    pub artists_not_found: usize,
    /// Fetch failed (after retries, for rate limits)
    pub artists_failed: usize,
    pub songs_fetched: usize,
    /// Dropped by the record filter (lyrics too short)
    pub songs_rejected: usize,
    /// Already in the table, or repeated within one artist's songs
    pub duplicates_skipped: usize,
    pub records_added: usize,
    /// Stopped early by a shutdown request
    pub interrupted: bool,
    pub store: StoreSummary,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Format summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Scrape Summary")
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan),
            ]);

        table.add_row(vec![
            Cell::new("Artists"),
            Cell::new(format!(
                "{}/{} ({} not found, {} failed)",
                self.artists_processed,
                self.artists_total,
                self.artists_not_found,
                self.artists_failed
            )),
        ]);
        table.add_row(vec![
            Cell::new("Songs fetched"),
            Cell::new(fmt_num(self.songs_fetched)),
        ]);
        table.add_row(vec![
            Cell::new("Too short"),
            Cell::new(fmt_num(self.songs_rejected)),
        ]);
        table.add_row(vec![
            Cell::new("Already stored"),
            Cell::new(fmt_num(self.duplicates_skipped)),
        ]);
        table.add_row(vec![
            Cell::new("New rows").fg(Color::Green),
            Cell::new(fmt_num(self.records_added)).fg(Color::Green),
        ]);
        add_store_rows(&mut table, &self.store);
        table.add_row(vec![
            Cell::new("Time"),
            Cell::new(format!("{:.1}s", self.elapsed.as_secs_f64())),
        ]);

        let mut out = format!("\n{table}");
        if self.interrupted {
            out.push_str("\n  Interrupted: remaining artists were not processed");
        }
        out
    }

    pub fn print(&self) {
        eprintln!("{}", self.format_table());
    }

    /// Log minimal summary (non-TTY mode).
    pub fn log(&self) {
        log::info!(
            "Scrape {}: {}/{} artists, +{} rows ({} not found, {} failed)",
            if self.interrupted { "interrupted" } else { "complete" },
            self.artists_processed,
            self.artists_total,
            fmt_num(self.records_added),
            self.artists_not_found,
            self.artists_failed
        );
        log::info!(
            "Table: {} rows, {} artists, {} distinct titles",
            fmt_num(self.store.rows),
            fmt_num(self.store.distinct_artists),
            fmt_num(self.store.distinct_titles)
        );
    }
}

fn add_store_rows(table: &mut Table, store: &StoreSummary) {
    table.add_row(vec![
        Cell::new("Total rows").add_attribute(Attribute::Bold),
        Cell::new(fmt_num(store.rows)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Distinct artists"),
        Cell::new(fmt_num(store.distinct_artists)),
    ]);
    table.add_row(vec![
        Cell::new("Distinct titles"),
        Cell::new(fmt_num(store.distinct_titles)),
    ]);
    if store.duplicate_keys > 0 {
        table.add_row(vec![
            Cell::new("Duplicate keys").fg(Color::Red),
            Cell::new(fmt_num(store.duplicate_keys)).fg(Color::Red),
        ]);
    }
}

/// Table for `lyricline stats`
pub fn format_store_table(store: &StoreSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Lyrics Table")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    add_store_rows(&mut table, store);
    format!("\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            artists_total: 3,
            artists_processed: 3,
            artists_not_found: 1,
            records_added: 1234,
            store: StoreSummary {
                rows: 1234,
                distinct_artists: 2,
                distinct_titles: 1200,
                duplicate_keys: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn table_lists_counters() {
        let table = summary().format_table();
        assert!(table.contains("3/3 (1 not found, 0 failed)"));
        assert!(table.contains("1,234"));
        assert!(!table.contains("Duplicate keys"));
        assert!(!table.contains("Interrupted"));
    }

    #[test]
    fn interrupted_run_is_flagged() {
        let s = RunSummary {
            interrupted: true,
            ..summary()
        };
        assert!(s.format_table().contains("Interrupted"));
    }

    #[test]
    fn store_table_shows_duplicates() {
        let store = StoreSummary {
            rows: 3,
            distinct_artists: 1,
            distinct_titles: 2,
            duplicate_keys: 1,
        };
        assert!(format_store_table(&store).contains("Duplicate keys"));
    }
}
