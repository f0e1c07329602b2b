use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use marquee_model::CatalogIndex;
use uuid::Uuid;

use super::CinemaObject;
use crate::cache::{CacheAside, CacheKey};
use crate::enrich::{CatalogEnricher, Enricher};
use crate::error::Result;
use crate::storage::DocumentStore;

/// Serves a single entity by id through the cache.
pub struct RetrieveService<T> {
    index: CatalogIndex,
    id: Uuid,
    docs: Arc<dyn DocumentStore>,
    cache: CacheAside,
    enricher: Arc<dyn Enricher>,
    _shape: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for RetrieveService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieveService")
            .field("index", &self.index)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: CinemaObject> RetrieveService<T> {
    pub fn new(
        index: CatalogIndex,
        id: Uuid,
        docs: Arc<dyn DocumentStore>,
        cache: CacheAside,
    ) -> Self {
        let enricher = Arc::new(CatalogEnricher::new(docs.clone()));
        Self {
            index,
            id,
            docs,
            cache,
            enricher,
            _shape: PhantomData,
        }
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::retrieve(self.index, self.id)
    }

    pub async fn get(&self) -> Result<T> {
        self.cache
            .get_or_insert_with(&self.cache_key(), || async {
                let document = self.docs.get_by_id(self.index, self.id).await?;
                T::from_document(document, self.enricher.as_ref()).await
            })
            .await
    }
}
