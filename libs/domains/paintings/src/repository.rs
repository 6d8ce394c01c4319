use async_trait::async_trait;

use crate::error::PaintingResult;
use crate::models::{StoreHit, StoreQuery, StoredPainting};

/// Read-only access to the painting document store
///
/// This trait abstracts the underlying search engine (Elasticsearch).
/// Implementations are shared across requests and must not hold
/// per-call state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaintingStore: Send + Sync {
    /// Fetch a single document by id, `None` when it does not exist
    async fn get(&self, id: &str) -> PaintingResult<Option<StoredPainting>>;

    /// Run a query, returning at most the requested number of hits in
    /// descending score order
    async fn search(&self, query: StoreQuery) -> PaintingResult<Vec<StoreHit>>;
}
