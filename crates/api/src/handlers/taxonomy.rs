//! Taxonomy endpoint.
//!
//! `GET /taxonomy` returns every configured taxonomy definition;
//! `GET /taxonomy?q=name` returns one of them.

use axum::extract::State;
use serde_json::json;
use strata_store::ContentStore;

use crate::error::{ApiError, ApiResult};
use crate::params::RawParams;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

/// Handler for configured taxonomies.
pub async fn taxonomy_handler<S>(
    State(state): State<AppState<S>>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    let name = raw.get("q").unwrap_or_default();
    let taxonomies = &state.settings().taxonomies;

    let data = if name.is_empty() {
        if taxonomies.is_empty() {
            None
        } else {
            Some(json!(taxonomies))
        }
    } else {
        taxonomies.get(name).cloned()
    };

    let Some(data) = data else {
        return Err(ApiError::not_found(format!(
            "Taxonomy with name [{name}] not found."
        )));
    };

    let document = Document::new().data(data).build();
    Ok(ApiResponse::ok(document).with_callback(raw.get("callback")))
}
