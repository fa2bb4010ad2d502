//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::ClientCache;
use crate::config::AdminConfig;
use crate::store::{StoreClient, StoreError};

/// Application state shared across all handlers.
///
/// Cheap to clone; every clone sees the same cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: StoreClient,
    cache: RwLock<ClientCache>,
}

impl AppState {
    /// Build the state with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store client cannot be created.
    pub fn new(config: AdminConfig) -> Result<Self, StoreError> {
        let store = StoreClient::new(&config.store)?;
        Ok(Self::with_cache(config, store, ClientCache::default()))
    }

    /// Build the state around an existing store client and cache contents.
    #[must_use]
    pub fn with_cache(config: AdminConfig, store: StoreClient, cache: ClientCache) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                cache: RwLock::new(cache),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }

    #[must_use]
    pub fn cache(&self) -> &RwLock<ClientCache> {
        &self.inner.cache
    }
}
