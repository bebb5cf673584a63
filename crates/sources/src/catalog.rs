//! Catalog lookup abstraction.
//!
//! The advisor never talks to the catalog API directly; it goes through
//! `CatalogLookup`. Production wiring (HTTP client, API key) lives outside
//! this workspace. `SnapshotCatalog` is the offline implementation used by
//! the CLI and tests.

use crate::error::{CatalogError, CatalogResult};
use watch_history::{ContentKind, Title, TitleId};

/// Read-only access to the upstream catalog.
#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// One page of titles the catalog recommends for `(id, kind)`.
    ///
    /// Every returned title has the same kind as the query.
    async fn get_recommended(
        &self,
        id: TitleId,
        kind: ContentKind,
        page: u32,
    ) -> CatalogResult<Vec<Title>>;

    /// One page of currently popular titles of `kind`.
    ///
    /// Backends without a popular listing report `NotFound`.
    async fn get_popular(&self, kind: ContentKind, page: u32) -> CatalogResult<Vec<Title>> {
        let _ = page;
        Err(CatalogError::NotFound(format!("popular {}", kind)))
    }

    /// Backend name for logging
    fn name(&self) -> &str;
}
