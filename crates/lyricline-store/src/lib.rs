//! lyricline-store: durable lyrics table with resume support
//!
//! The table is a CSV file (`artist,song_title,lyrics`) loaded fully at startup
//! and rewritten atomically after every artist, so an interrupted run loses at
//! most the artist in flight. [`DedupIndex`] keeps reruns from adding a song twice.

pub mod dedup;
pub mod error;
pub mod persister;
pub mod summary;
pub mod table;

pub use dedup::DedupIndex;
pub use error::PersistError;
pub use persister::Persister;
pub use summary::StoreSummary;
pub use table::{HEADER, read_records};
