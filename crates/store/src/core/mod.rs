//! Core storage trait.
//!
//! [`ContentStore`] is the complete interface the API layer needs from a
//! backend: one paged fetch, one batched fetch by ids, one single-record
//! lookup, and the id-order neighbors used for sibling links. Everything else
//! (projection, link building, include resolution) happens above this
//! boundary.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{ContentRecord, ContentSchema, PageResult, StoreQuery};

/// Read-only storage interface for content records.
///
/// Implementations own query execution: they apply the compiled filters,
/// contains patterns, sort order, free-text search and pagination from the
/// [`StoreQuery`] and report the totals for the full (unpaged) match set.
///
/// The API layer performs a bounded number of calls per request: one
/// `fetch_page` for the primary result set plus one `fetch_by_ids` per
/// distinct include type. Backends are not expected to cache or retry; a
/// failure propagates to the caller as-is.
///
/// # Example
///
/// ```ignore
/// use strata_store::{ContentStore, StoreQuery};
///
/// async fn first_page<S: ContentStore>(store: &S) -> anyhow::Result<()> {
///     let query = StoreQuery {
///         limit: Some(10),
///         ..Default::default()
///     };
///     let page = store.fetch_page("articles", &query).await?;
///     println!("{} of {} articles", page.items.len(), page.total_results);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Returns the content schema this store serves.
    fn schema(&self) -> &ContentSchema;

    /// Executes a compiled query against one content type.
    ///
    /// Returns the requested page plus totals over the full match set.
    ///
    /// # Errors
    ///
    /// * `StoreError::UnknownContentType` - the type is not in the schema
    /// * `StoreError::InvalidQuery` - the query references something the
    ///   backend cannot evaluate
    async fn fetch_page(&self, content_type: &str, query: &StoreQuery)
    -> StoreResult<PageResult>;

    /// Fetches a single record by id or slug.
    async fn fetch_one(
        &self,
        content_type: &str,
        id_or_slug: &str,
    ) -> StoreResult<Option<ContentRecord>>;

    /// Fetches records by id, in the order the ids are given.
    ///
    /// Unknown ids are skipped, not an error; callers treat missing related
    /// records as tolerable content inconsistency.
    async fn fetch_by_ids(
        &self,
        content_type: &str,
        ids: &[String],
    ) -> StoreResult<Vec<ContentRecord>>;

    /// Returns the previous and next record ids in natural (id) order,
    /// relative to the given record.
    async fn neighbors(
        &self,
        content_type: &str,
        id: &str,
    ) -> StoreResult<(Option<String>, Option<String>)>;
}
