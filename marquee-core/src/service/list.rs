use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use marquee_model::{CatalogIndex, Filter, Page, SearchIntent, SortSpec};

use super::CinemaObject;
use super::objects::CinemaObjectList;
use crate::cache::{CacheAside, CacheKey};
use crate::enrich::{CatalogEnricher, Enricher};
use crate::error::Result;
use crate::query::{ListQuery, QueryBuilder};
use crate::storage::DocumentStore;

/// Serves one page of a listing through the cache.
pub struct ListService<L> {
    index: CatalogIndex,
    docs: Arc<dyn DocumentStore>,
    cache: CacheAside,
    enricher: Arc<dyn Enricher>,
    query: ListQuery,
    _shape: PhantomData<fn() -> L>,
}

impl<L> fmt::Debug for ListService<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListService")
            .field("index", &self.index)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl<L: CinemaObjectList> ListService<L> {
    pub fn new(index: CatalogIndex, docs: Arc<dyn DocumentStore>, cache: CacheAside) -> Self {
        let enricher = Arc::new(CatalogEnricher::new(docs.clone()));
        Self {
            index,
            docs,
            cache,
            enricher,
            query: ListQuery::new(),
            _shape: PhantomData,
        }
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.query = self.query.filter(filter);
        self
    }

    pub fn search(mut self, search: Option<SearchIntent>) -> Self {
        self.query = self.query.search(search);
        self
    }

    pub fn sort(mut self, sort: Option<SortSpec>) -> Self {
        self.query = self.query.sort(sort);
        self
    }

    pub fn page(mut self, page: Option<Page>) -> Self {
        self.query = self.query.page(page);
        self
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::list(self.index, &self.query)
    }

    pub async fn get(&self) -> Result<L> {
        self.cache
            .get_or_insert_with(&self.cache_key(), || self.load())
            .await
    }

    async fn load(&self) -> Result<L> {
        let request = self.query.build(self.docs.as_ref()).await?;
        let documents = self.docs.search(self.index, &request).await?;

        let mut items = Vec::with_capacity(documents.len());
        for document in documents {
            items.push(L::Item::from_document(document, self.enricher.as_ref()).await?);
        }
        Ok(L::from(items))
    }
}
