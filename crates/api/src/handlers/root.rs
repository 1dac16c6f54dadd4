//! Root endpoint.
//!
//! `GET /` confirms the API is alive; with `debug` enabled in the settings it
//! reports version information instead.

use axum::extract::State;
use serde_json::json;
use strata_store::ContentStore;

use crate::error::ApiResult;
use crate::params::RawParams;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

/// Handler for the API root.
pub async fn root_handler<S>(
    State(state): State<AppState<S>>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    let data = if state.settings().debug {
        json!({
            "versions": {
                "strata": env!("CARGO_PKG_VERSION"),
            }
        })
    } else {
        json!("API is active.")
    };

    let document = Document::new().data(data).build();
    Ok(ApiResponse::ok(document).with_callback(raw.get("callback")))
}
