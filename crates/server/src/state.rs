//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::retailer::{RetailerClient, RetailerError};
use crate::stores::MemoryStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The retailer client is constructed once and
/// injected here rather than living behind a global, so tests can stand up
/// states with substitutable configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    retailer: RetailerClient,
    store: MemoryStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the retailer HTTP client fails to build.
    pub fn new(config: AppConfig) -> Result<Self, RetailerError> {
        let retailer = RetailerClient::new(&config.retailer)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                retailer,
                store: MemoryStore::new(),
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the retailer gateway client.
    #[must_use]
    pub fn retailer(&self) -> &RetailerClient {
        &self.inner.retailer
    }

    /// Get a reference to the credential/recipe record store.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.inner.store
    }
}
