//! Application state management.
//!
//! The Elasticsearch store is built once at start-up and shared by every
//! request through an `Arc`.

use domain_paintings::ElasticsearchStore;
use std::sync::Arc;

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Elasticsearch store (pooled HTTP client, no lock needed)
    pub store: Arc<ElasticsearchStore>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> eyre::Result<Self> {
        let store = ElasticsearchStore::new(&config.elasticsearch)
            .map_err(|e| eyre::eyre!("Failed to create Elasticsearch store: {}", e))?;

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }
}
