//! Lyricline Core - Common infrastructure for the lyrics scraper
//!
//! Error taxonomy, rate-limit backoff, the lyrics source contract, and the
//! logging/progress plumbing shared by every crate in the workspace.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;
pub mod record;
pub mod retry;
pub mod shutdown;
pub mod source;

// Re-exports for convenience
pub use error::{RemoteError, SourceError};
pub use http::SHARED_RUNTIME;
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, fmt_num};
pub use record::{ArtistResult, Record, Song};
pub use retry::{BackoffPolicy, Sleeper, ThreadSleeper, retry_with_backoff};
pub use shutdown::{install_signal_handlers, is_shutdown_requested};
pub use source::LyricsSource;
