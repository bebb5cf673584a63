//! # Watch History Crate
//!
//! Domain types and the persisted watch-history format for the content
//! advisor.
//!
//! ## Main Components
//!
//! - **types**: Title, ContentKind, WatchRecord, UserHistory, RecommendationSeed
//! - **codec**: encode/decode one history line, with legacy fallback
//! - **store**: HistoryStore trait and the in-memory / JSON-file store
//! - **error**: DecodeError (per line) and HistoryError (per store)
//!
//! ## Example Usage
//!
//! ```ignore
//! use watch_history::{codec, HistoryStore, InMemoryHistoryStore};
//! use std::path::Path;
//!
//! let store = InMemoryHistoryStore::load_from_file(Path::new("history.json"))?;
//! let history = store.get_history("ada@example.com")?;
//!
//! for record in history.iter() {
//!     println!("{}", codec::encode(record));
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod codec;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{DecodeError, HistoryError, Result};
pub use codec::{Decoded, DecodedBatch};
pub use store::{HistoryStore, InMemoryHistoryStore};
pub use types::{
    ContentKind,
    RecommendationSeed,
    Title,
    TitleId,
    UserHistory,
    WatchRecord,
};
