//! Route table for the content API.
//!
//! Defines all routes served by the API. Everything is a GET: the API is a
//! read-only projection of the store.

use axum::{Router, routing::get};
use strata_store::ContentStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all content API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /` - API status (version info with `debug`)
/// - `GET /menu` - Configured menu trees
/// - `GET /taxonomy` - Configured taxonomy definitions
/// - `GET /search` - Search across every content type
///
/// ## Type-level
/// - `GET /{content_type}` - Paginated listing
/// - `GET /{content_type}/search` - Search within one type
///
/// ## Instance-level
/// - `GET /{content_type}/{id_or_slug}` - Single resource
/// - `GET /{content_type}/{id_or_slug}/{related_type}` - Related listing
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ContentStore + 'static,
{
    Router::new()
        // System-level routes
        .route("/", get(handlers::root_handler::<S>))
        .route("/menu", get(handlers::menu_handler::<S>))
        .route("/taxonomy", get(handlers::taxonomy_handler::<S>))
        .route("/search", get(handlers::search_all_handler::<S>))
        // Type-level routes
        .route("/{content_type}", get(handlers::list_handler::<S>))
        .route(
            "/{content_type}/search",
            get(handlers::search_handler::<S>),
        )
        // Instance-level routes
        .route(
            "/{content_type}/{id_or_slug}",
            get(handlers::single_handler::<S>),
        )
        .route(
            "/{content_type}/{id_or_slug}/{related_type}",
            get(handlers::related_handler::<S>),
        )
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    // Route behavior is covered by the integration tests.
}
