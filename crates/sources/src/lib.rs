//! # Sources Crate
//!
//! Candidate generation for personalized recommendations.
//!
//! ## Components
//!
//! ### History Selector (`seeds`)
//! Picks the most recently watched titles per kind as lookup seeds, and
//! the last watched title per kind for display.
//!
//! ### Catalog (`catalog`, `snapshot`)
//! `CatalogLookup` is the seam to the upstream catalog API.
//! `SnapshotCatalog` answers from a JSON snapshot for offline use.
//!
//! ### Similar-Titles Source (`similar`)
//! Fetches one page of "recommended alongside" titles per seed, with a
//! per-call timeout and per-seed error isolation.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{user_context::build_user_context, SimilarTitlesSource, SnapshotCatalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(SnapshotCatalog::load_from_file(path)?);
//! let context = build_user_context(&store, "ada@example.com", 3)?;
//!
//! let source = SimilarTitlesSource::new(catalog);
//! for (idx, seed) in context.seeds.iter().enumerate() {
//!     let candidates = source.fetch(*seed, idx).await?;
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod seeds;
pub mod user_context;
pub mod catalog;
pub mod snapshot;
pub mod similar;

// Re-export commonly used types
pub use catalog::CatalogLookup;
pub use error::{CatalogError, CatalogResult, SeedLookupError};
pub use seeds::{select_last_watched_per_kind, select_seeds, LastWatched, DEFAULT_SEEDS_PER_KIND};
pub use similar::SimilarTitlesSource;
pub use snapshot::{CatalogSnapshot, SnapshotCatalog};
pub use types::{Candidate, UserContext};
