pub mod scrape;
pub mod song;
pub mod stats;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

/// Settings shared by every subcommand, already merged across file, env and flags.
#[derive(Clone)]
pub struct Globals {
    pub token: Option<String>,
    pub max_retries: u32,
    pub initial_backoff_secs: f64,
}

pub fn print_config(globals: &Globals, config: &Config) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let g = &config.genius;
    let s = &config.scrape;
    table.add_row(vec![
        "API token",
        if globals.token.is_some() {
            "configured"
        } else {
            "not set"
        },
    ]);
    table.add_row(vec!["API base URL", &g.base_url]);
    table.add_row(vec!["Request timeout", &format!("{}s", g.timeout_secs)]);
    table.add_row(vec!["Transport retries", &g.transport_retries.to_string()]);
    table.add_row(vec!["Page delay", &format!("{}ms", g.page_delay_ms)]);
    table.add_row(vec!["Excluded terms", &g.excluded_terms.join(", ")]);
    table.add_row(vec![
        "Remove section headers",
        &g.remove_section_headers.to_string(),
    ]);
    table.add_row(vec!["Skip non-songs", &g.skip_non_songs.to_string()]);
    table.add_row(vec!["Songs per artist", &s.items_per_artist.to_string()]);
    table.add_row(vec!["Pace delay", &format!("{}s", s.pace_delay_secs)]);
    table.add_row(vec![
        "Backoff",
        &format!(
            "{}s initial, {} retries",
            globals.initial_backoff_secs, globals.max_retries
        ),
    ]);
    table.add_row(vec!["Min lyrics chars", &s.min_lyrics_chars.to_string()]);
    table.add_row(vec!["Artist list", &config.paths.artists.display().to_string()]);
    table.add_row(vec!["Output table", &config.paths.output.display().to_string()]);

    eprintln!("\n{table}");
}
