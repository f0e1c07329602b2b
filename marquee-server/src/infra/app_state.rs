use std::{fmt, sync::Arc};

use marquee_config::Config;
use marquee_core::{CacheAside, CacheStore, DocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub docs: Arc<dyn DocumentStore>,
    pub cache: Arc<dyn CacheStore>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(docs: Arc<dyn DocumentStore>, cache: Arc<dyn CacheStore>, config: Config) -> Self {
        Self {
            docs,
            cache,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-through cache using the configured TTL.
    pub fn cache_aside(&self) -> CacheAside {
        CacheAside::new(self.cache.clone(), self.config.cache.ttl)
    }
}
