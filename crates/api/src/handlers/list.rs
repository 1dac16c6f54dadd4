//! Content listing handler.
//!
//! `GET /{content_type}?params` - the full pipeline: compile the parameters,
//! fetch one page, project every record, resolve includes, build the
//! pagination links.

use axum::extract::{Path, State};
use serde_json::Value;
use strata_store::ContentStore;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::include;
use crate::links;
use crate::params::{QueryDescription, RawParams};
use crate::project::project;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

/// Handler for content listings.
///
/// # Response
///
/// `{links, meta: {count, total}, data, included?}` with pagination links
/// for the compiled page.
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    Path(content_type): Path<String>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    debug!(content_type = %content_type, "processing list request");

    let query = QueryDescription::compile(
        raw,
        &content_type,
        state.schema(),
        state.settings(),
        state.default_page_size(),
        state.max_page_size(),
    )?;

    let page = state
        .store()
        .fetch_page(&content_type, &query.to_store_query())
        .await?;

    if page.items.is_empty() {
        return Err(ApiError::invalid(
            "Bad request: There were no results based upon your criteria!",
        ));
    }

    let ctx = state.projection_context();
    let fields = query.fields_for(&content_type);
    let data: Vec<Value> = page
        .items
        .iter()
        .map(|record| project(record, fields, &ctx))
        .collect();

    let included = include::resolve(state.store(), &query, &page.items, &ctx).await?;

    let links = links::page_links(
        state.base_path(),
        &content_type,
        query.page().number(),
        page.total_pages,
        query.raw(),
    );

    debug!(
        content_type = %content_type,
        count = data.len(),
        total = page.total_results,
        "list request completed"
    );

    let document = Document::new()
        .links(links)
        .meta(data.len(), page.total_results)
        .data(Value::Array(data))
        .included(included)
        .build();

    Ok(ApiResponse::ok(document).with_callback(query.raw().get("callback")))
}
