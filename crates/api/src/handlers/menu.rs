//! Menu endpoint.
//!
//! `GET /menu` returns every configured menu tree; `GET /menu?q=name`
//! returns one of them. Menus live in the settings file, not the store.

use axum::extract::State;
use serde_json::json;
use strata_store::ContentStore;

use crate::error::{ApiError, ApiResult};
use crate::params::RawParams;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

/// Handler for configured menus.
pub async fn menu_handler<S>(
    State(state): State<AppState<S>>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    let name = raw.get("q").unwrap_or_default();
    let menus = &state.settings().menus;

    let data = if name.is_empty() {
        if menus.is_empty() {
            None
        } else {
            Some(json!(menus))
        }
    } else {
        menus.get(name).cloned()
    };

    let Some(data) = data else {
        return Err(ApiError::not_found(format!(
            "Menu with name [{name}] not found."
        )));
    };

    let document = Document::new().data(data).build();
    Ok(ApiResponse::ok(document).with_callback(raw.get("callback")))
}
