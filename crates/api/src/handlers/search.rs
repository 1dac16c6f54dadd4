//! Free-text search handlers.
//!
//! `GET /{content_type}/search?q=term` searches one content type;
//! `GET /search?q=term` searches every type in the schema. Search bypasses
//! the filter machinery: the term goes to the store as-is and pagination is
//! applied over the combined result set.

use axum::extract::{Path, State};
use serde_json::Value;
use strata_store::{ContentRecord, ContentStore, SortDirection, StoreQuery};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::links;
use crate::params::{Page, RawParams, fields};
use crate::project::project;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

/// Handler for a single-type search.
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    Path(content_type): Path<String>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    if !state.schema().contains(&content_type) {
        return Err(ApiError::not_found(format!(
            "Contenttype with name [{content_type}] not found."
        )));
    }
    let label = format!("{content_type}/search");
    execute_search(&state, vec![content_type], &label, raw).await
}

/// Handler for the all-types search.
pub async fn search_all_handler<S>(
    State(state): State<AppState<S>>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    let targets: Vec<String> = state.schema().type_names().map(str::to_string).collect();
    execute_search(&state, targets, "search", raw).await
}

async fn execute_search<S>(
    state: &AppState<S>,
    targets: Vec<String>,
    label: &str,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    let Some(term) = raw.get("q").filter(|q| !q.is_empty()) else {
        return Err(ApiError::invalid("No query parameter q specified."));
    };
    let term = term.to_string();

    debug!(term = %term, targets = targets.len(), "processing search request");

    // One unpaged fetch per target type; pagination happens over the
    // combined set.
    let store_query = StoreQuery {
        order: vec![("id".to_string(), SortDirection::Asc)],
        search: Some(term.clone()),
        ..Default::default()
    };
    let mut results: Vec<ContentRecord> = Vec::new();
    for target in &targets {
        let page = state.store().fetch_page(target, &store_query).await?;
        results.extend(page.items);
    }

    let page = Page::compile(&raw, state.default_page_size(), state.max_page_size());
    let total = results.len() as u64;
    let total_pages = total.div_ceil(page.size()).max(1);
    let window: Vec<ContentRecord> = results
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size() as usize)
        .collect();

    if window.is_empty() {
        return Err(ApiError::not_found(format!(
            "No search results found for query [{term}]"
        )));
    }

    let ctx = state.projection_context();
    let data: Vec<Value> = window
        .iter()
        .map(|record| {
            let resolved =
                fields::resolve(&raw, &record.content_type, state.schema(), state.settings());
            project(record, &resolved, &ctx)
        })
        .collect();

    let links = links::page_links(state.base_path(), label, page.number(), total_pages, &raw);

    let document = Document::new()
        .links(links)
        .meta(data.len(), total)
        .data(Value::Array(data))
        .build();

    Ok(ApiResponse::ok(document).with_callback(raw.get("callback")))
}
