use async_trait::async_trait;
use marquee_model::{CatalogIndex, Filter, Page, SearchIntent, SortSpec};
use tracing::debug;

use super::{SearchRequest, dsl};
use crate::documents::{self, GenreDocument, PersonDocument};
use crate::error::Result;
use crate::storage::DocumentStore;

/// Produces the search request for a listing.
#[async_trait]
pub trait QueryBuilder: Send + Sync {
    /// `docs` is used to resolve related entities a filter refers to.
    async fn build(&self, docs: &dyn DocumentStore) -> Result<SearchRequest>;
}

/// Parameters of a listing: filter or search, then sort, then page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: Filter,
    pub search: Option<SearchIntent>,
    pub sort: Option<SortSpec>,
    pub page: Option<Page>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn search(mut self, search: Option<SearchIntent>) -> Self {
        self.search = search;
        self
    }

    pub fn sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: Option<Page>) -> Self {
        self.page = page;
        self
    }
}

#[async_trait]
impl QueryBuilder for ListQuery {
    async fn build(&self, docs: &dyn DocumentStore) -> Result<SearchRequest> {
        // A filter wins over a search; the search is ignored, not merged.
        let mut request = match (&self.filter, &self.search) {
            (Filter::None, Some(search)) => SearchRequest::with_body(dsl::search_data(
                search.text(),
                search.fields(),
            )),
            (Filter::None, None) => SearchRequest::default(),
            (filter, _) => resolve_filter(filter, docs).await?,
        };

        if let Some(sort) = &self.sort {
            request.sort = Some(sort.to_param());
        }

        if let Some(page) = &self.page {
            request.from = Some(page.offset());
            request.size = Some(u64::from(page.size()));
        }

        debug!(?request, "Built list query");
        Ok(request)
    }
}

/// Fetches the entity a filter points at and builds the matching film query.
pub(crate) async fn resolve_filter(
    filter: &Filter,
    docs: &dyn DocumentStore,
) -> Result<SearchRequest> {
    match filter {
        Filter::None => Ok(SearchRequest::default()),
        Filter::ByGenreId(id) => {
            let genre: GenreDocument =
                documents::parse("genre", docs.get_by_id(CatalogIndex::Genres, *id).await?)?;
            Ok(SearchRequest::with_body(dsl::films_by_genre(&genre.name)))
        }
        Filter::ByPersonId(id) => {
            let person: PersonDocument = documents::parse(
                "person",
                docs.get_by_id(CatalogIndex::Persons, *id).await?,
            )?;
            Ok(SearchRequest::with_body(dsl::films_by_person(
                person.id,
                &person.full_name,
                dsl::PERSON_FILM_LIST_FIELDS,
            )))
        }
    }
}
