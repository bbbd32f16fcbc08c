//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: one indicatif bar over the artist list.
//! Non-TTY mode: hidden bars, progress goes to the log instead.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Width of the artist name column on the bar
const PREFIX_WIDTH: usize = 24;

fn artist_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} {prefix:<24.cyan.bold} {bar:30.green/dim} {pos:>4}/{len:4} {elapsed_precise} {wide_msg:.dim}",
    )
    .expect("invalid template")
    .progress_chars("━━─")
}

/// Central progress context managing multi-progress bars.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self::with_tty(std::io::stderr().is_terminal())
    }

    /// Force a mode; tests use `with_tty(false)` to keep output clean.
    pub fn with_tty(is_tty: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Bar over `total` artists. Hidden outside a TTY.
    pub fn artist_bar(&self, total: usize) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(artist_style());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorten an artist name to fit the bar prefix, respecting char boundaries.
pub fn bar_prefix(name: &str) -> String {
    if name.chars().count() <= PREFIX_WIDTH {
        return name.to_string();
    }
    let mut s: String = name.chars().take(PREFIX_WIDTH - 1).collect();
    s.push('…');
    s
}

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
