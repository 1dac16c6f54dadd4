//! # strata-api - JSON:API Projection Layer for Headless Content
//!
//! This crate exposes content records stored behind a
//! [`strata_store::ContentStore`] as JSON:API documents: stable
//! `id`/`type`/`attributes`/`relationships`/`links` resource objects,
//! pagination envelopes, sparse fieldsets and compound `included` documents.
//!
//! The interesting work happens in four pieces that form one pipeline:
//!
//! 1. [`params`] - the parameter compiler: raw query string → validated,
//!    typed [`params::QueryDescription`] (pagination, sort, filters,
//!    contains, includes, sparse fieldsets). Fail-fast: an invalid field or
//!    include aborts the request before anything is fetched.
//! 2. [`project`] - the resource projector: one content record plus a
//!    resolved field list → one resource object, with field-type-aware
//!    rendering (dates, files, images, taxonomies, repeating groups).
//! 3. [`links`] - the link builder: pagination link sets and relationship
//!    summaries, re-serializing the request's own query string.
//! 4. [`include`] - the include resolver: batched fetching and de-duplicated
//!    projection of related records.
//!
//! [`response`] assembles their outputs into the final envelope and
//! [`handlers`] wires the pipeline to the routes.
//!
//! ## Endpoints
//!
//! | URL | Description |
//! |-----|-------------|
//! | `GET /` | API status |
//! | `GET /menu?q=name` | Configured menus |
//! | `GET /taxonomy?q=name` | Configured taxonomies |
//! | `GET /search?q=term` | Search all content types |
//! | `GET /{type}?params` | Paginated listing |
//! | `GET /{type}/search?q=term` | Search one content type |
//! | `GET /{type}/{id_or_slug}` | Single resource |
//! | `GET /{type}/{id_or_slug}/{related}` | Related listing |
//!
//! ## Query parameters
//!
//! | Parameter | Example | Description |
//! |-----------|---------|-------------|
//! | `page[number]`, `page[size]` | `page[number]=2` | Pagination (legacy `page`/`limit` aliases supported) |
//! | `sort` | `sort=title,-datepublish` | Sort keys, `-` for descending |
//! | `filter[field]` | `filter[status]=published,pending` | OR of exact matches |
//! | `contains[field]` | `contains[body]=rust` | OR of substring matches |
//! | `include` | `include=authors` | Compound related resources |
//! | `fields[type]` | `fields[articles]=title,teaser` | Sparse fieldsets |
//! | `q` | `q=term` | Free-text search (search routes) |
//! | `callback` | `callback=cb` | JSONP wrapping |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strata_api::{ApiSettings, ServerConfig, create_app};
//! use strata_store::backends::memory::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new(schema);
//!     let app = create_app(store, ServerConfig::default(), ApiSettings::default());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod include;
pub mod links;
pub mod params;
pub mod project;
pub mod response;
pub mod routing;
pub mod settings;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use params::{CompileError, QueryDescription, RawParams};
pub use settings::ApiSettings;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use axum::response::Response;
use http::{HeaderName, HeaderValue};
use strata_store::ContentStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the Axum application for a storage backend.
///
/// This sets up the complete content API with all routes, the static
/// response headers from the settings, and the middleware stack.
pub fn create_app<S>(store: S, config: ServerConfig, settings: ApiSettings) -> Router
where
    S: ContentStore + 'static,
{
    info!(
        "Creating content API with backend: {}",
        store.backend_name()
    );

    let static_headers = build_static_headers(&settings);

    // Create application state
    let state = AppState::new(Arc::new(store), config.clone(), settings);

    // Build the router with all content routes
    let router = routing::create_routes(state);

    // Static headers apply to every response, error envelopes included
    let router = router.layer(axum::middleware::map_response(
        move |mut response: Response| {
            let headers = Arc::clone(&static_headers);
            async move {
                for (name, value) in headers.iter() {
                    response.headers_mut().insert(name.clone(), value.clone());
                }
                response
            }
        },
    ));

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Parses the configured static headers, dropping invalid names or values.
fn build_static_headers(settings: &ApiSettings) -> Arc<Vec<(HeaderName, HeaderValue)>> {
    let mut headers = Vec::new();
    for (name, value) in &settings.headers {
        match (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => headers.push((name, value)),
            _ => warn!(header = %name, "ignoring invalid static response header"),
        }
    }
    Arc::new(headers)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strata_api={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
