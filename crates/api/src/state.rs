//! Application state for the content API.
//!
//! Holds the shared, read-only pieces every handler needs: the storage
//! backend, the server configuration and the API settings. Request-scoped
//! data (the raw parameter snapshot, the compiled query description) is
//! passed explicitly instead of living here.

use std::sync::Arc;

use strata_store::{ContentSchema, ContentStore};

use crate::config::ServerConfig;
use crate::project::ProjectionContext;
use crate::settings::ApiSettings;

/// Shared application state.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`ContentStore`])
pub struct AppState<S> {
    store: Arc<S>,
    config: Arc<ServerConfig>,
    settings: Arc<ApiSettings>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S: ContentStore> AppState<S> {
    /// Creates a new state from the backend, configuration and settings.
    pub fn new(store: Arc<S>, config: ServerConfig, settings: ApiSettings) -> Self {
        Self {
            store,
            config: Arc::new(config),
            settings: Arc::new(settings),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the content schema served by the backend.
    pub fn schema(&self) -> &ContentSchema {
        self.store.schema()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns a reference to the API settings.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Returns the base of every generated link, without a trailing slash.
    pub fn base_path(&self) -> &str {
        self.config.base_path()
    }

    /// Returns the default page size for list results.
    pub fn default_page_size(&self) -> u64 {
        self.config.default_page_size
    }

    /// Returns the maximum page size for list results.
    pub fn max_page_size(&self) -> u64 {
        self.config.max_page_size
    }

    /// Builds the projection context for this deployment.
    pub fn projection_context(&self) -> ProjectionContext<'_> {
        ProjectionContext::new(self.base_path(), &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::backends::memory::MemoryStore;

    fn state() -> AppState<MemoryStore> {
        let store = MemoryStore::new(ContentSchema::new());
        AppState::new(
            Arc::new(store),
            ServerConfig::for_testing(),
            ApiSettings::default(),
        )
    }

    #[test]
    fn state_exposes_backend_and_config() {
        let state = state();
        assert_eq!(state.store().backend_name(), "memory");
        assert_eq!(state.default_page_size(), 10);
        assert_eq!(state.base_path(), "http://localhost:8080");
    }

    #[test]
    fn projection_context_reflects_settings() {
        let state = state();
        let ctx = state.projection_context();
        assert!(ctx.iso_dates);
        assert_eq!(ctx.files_path, "/files/");
        assert!(ctx.thumbnail.is_none());
    }

    #[test]
    fn state_clones_share_the_backend() {
        let state = state();
        let cloned = state.clone();
        assert_eq!(
            state.store().backend_name(),
            cloned.store().backend_name()
        );
    }
}
