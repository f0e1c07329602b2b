//! Cross-index enrichment.
//!
//! A film document names its genres and directors but does not carry their
//! ids; a person document knows nothing about the films it appears in. The
//! enricher resolves both with follow-up searches.

use std::sync::Arc;

use async_trait::async_trait;
use marquee_model::{CatalogIndex, GenreInFilm, PersonInFilm, PrimaryRole};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::documents::{self, FilmDocument, GenreDocument, PersonDocument};
use crate::error::{CatalogError, Result};
use crate::query::{SearchRequest, dsl};
use crate::storage::DocumentStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmEnrichment {
    pub genre: Vec<GenreInFilm>,
    pub directors: Vec<PersonInFilm>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonEnrichment {
    pub film_ids: Vec<Uuid>,
    pub role: PrimaryRole,
}

#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich_film(&self, film: &FilmDocument) -> Result<FilmEnrichment>;

    async fn enrich_person(&self, person: &PersonDocument) -> Result<PersonEnrichment>;
}

/// Enricher backed by the catalog indices themselves.
#[derive(Clone)]
pub struct CatalogEnricher {
    docs: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for CatalogEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEnricher").finish_non_exhaustive()
    }
}

impl CatalogEnricher {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }

    /// Zero matches is an empty set here, not an error.
    async fn lookup(&self, index: CatalogIndex, body: Value) -> Result<Vec<Value>> {
        match self.docs.search(index, &SearchRequest::with_body(body)).await {
            Ok(hits) => Ok(hits),
            Err(CatalogError::NotFound(what)) => {
                debug!("Enrichment lookup found nothing: {}", what);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Enricher for CatalogEnricher {
    async fn enrich_film(&self, film: &FilmDocument) -> Result<FilmEnrichment> {
        let mut enrichment = FilmEnrichment::default();

        if !film.genre.is_empty() {
            for hit in self
                .lookup(CatalogIndex::Genres, dsl::genres_by_film(&film.genre))
                .await?
            {
                let genre: GenreDocument = documents::parse("genre", hit)?;
                enrichment.genre.push(GenreInFilm {
                    uuid: genre.id,
                    name: genre.name,
                });
            }
        }

        if !film.director.is_empty() {
            for hit in self
                .lookup(CatalogIndex::Persons, dsl::directors_by_film(&film.director))
                .await?
            {
                let person: PersonDocument = documents::parse("person", hit)?;
                enrichment.directors.push(PersonInFilm {
                    uuid: person.id,
                    full_name: person.full_name,
                });
            }
        }

        Ok(enrichment)
    }

    async fn enrich_person(&self, person: &PersonDocument) -> Result<PersonEnrichment> {
        let body = dsl::films_by_person(person.id, &person.full_name, dsl::PERSON_ROLE_FIELDS);
        let films = self
            .lookup(CatalogIndex::Movies, body)
            .await?
            .into_iter()
            .map(|hit| documents::parse::<FilmDocument>("film", hit))
            .collect::<Result<Vec<_>>>()?;

        Ok(PersonEnrichment {
            film_ids: films.iter().map(|film| film.id).collect(),
            role: infer_role(&person.full_name, &films),
        })
    }
}

/// The role the person is credited with in most films.
///
/// Each film casts one vote per credit naming the person (actor, then
/// writer, then director). Ties go to the role that received a vote first.
pub fn infer_role(full_name: &str, films: &[FilmDocument]) -> PrimaryRole {
    let mut tally: Vec<(PrimaryRole, usize)> = Vec::new();

    for film in films {
        let credits = [
            (PrimaryRole::Actor, &film.actors_names),
            (PrimaryRole::Writer, &film.writers_names),
            (PrimaryRole::Director, &film.director),
        ];
        for (role, names) in credits {
            if !names.iter().any(|name| name == full_name) {
                continue;
            }
            match tally.iter_mut().find(|(seen, _)| *seen == role) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((role, 1)),
            }
        }
    }

    let mut best: Option<(PrimaryRole, usize)> = None;
    for (role, votes) in tally {
        if best.is_none_or(|(_, top)| votes > top) {
            best = Some((role, votes));
        }
    }
    best.map(|(role, _)| role).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryDocumentStore;
    use serde_json::json;

    fn credits(actors: &[&str], writers: &[&str], director: &[&str]) -> FilmDocument {
        FilmDocument {
            id: Uuid::new_v4(),
            actors_names: actors.iter().map(|s| s.to_string()).collect(),
            writers_names: writers.iter().map(|s| s.to_string()).collect(),
            director: director.iter().map(|s| s.to_string()).collect(),
            ..FilmDocument::default()
        }
    }

    #[test]
    fn majority_role_wins() {
        let films = vec![
            credits(&[], &["Ann"], &[]),
            credits(&[], &["Ann"], &[]),
            credits(&["Ann"], &[], &[]),
        ];
        assert_eq!(infer_role("Ann", &films), PrimaryRole::Writer);
    }

    #[test]
    fn no_films_means_no_role() {
        assert_eq!(infer_role("Ann", &[]), PrimaryRole::Unassigned);
        assert_eq!(
            infer_role("Ann", &[credits(&["Bob"], &[], &[])]),
            PrimaryRole::Unassigned
        );
    }

    #[test]
    fn ties_go_to_the_first_vote() {
        let films = vec![credits(&[], &[], &["Ann"]), credits(&["Ann"], &[], &[])];
        assert_eq!(infer_role("Ann", &films), PrimaryRole::Director);

        let both_in_one = vec![credits(&["Ann"], &["Ann"], &[])];
        assert_eq!(infer_role("Ann", &both_in_one), PrimaryRole::Actor);
    }

    #[tokio::test]
    async fn film_enrichment_resolves_genres_and_directors() {
        let comedy = Uuid::new_v4();
        let director = Uuid::new_v4();
        let store = Arc::new(MemoryDocumentStore::seeded([
            (
                CatalogIndex::Genres,
                json!({ "id": comedy, "name": "Comedy", "description": "" }),
            ),
            (
                CatalogIndex::Genres,
                json!({ "id": Uuid::new_v4(), "name": "Horror", "description": "" }),
            ),
            (
                CatalogIndex::Persons,
                json!({ "id": director, "full_name": "Jane Doe" }),
            ),
        ]));
        let enricher = CatalogEnricher::new(store.clone());

        let film = FilmDocument {
            id: Uuid::new_v4(),
            genre: vec!["Comedy".into()],
            director: vec!["Jane Doe".into()],
            ..FilmDocument::default()
        };
        let enrichment = enricher.enrich_film(&film).await.unwrap();

        assert_eq!(
            enrichment.genre,
            vec![GenreInFilm {
                uuid: comedy,
                name: "Comedy".into()
            }]
        );
        assert_eq!(enrichment.directors[0].uuid, director);
        assert_eq!(store.search_calls(), 2);
    }

    #[tokio::test]
    async fn person_without_films_enriches_empty() {
        let store = Arc::new(MemoryDocumentStore::new());
        let enricher = CatalogEnricher::new(store);
        let person = PersonDocument {
            id: Uuid::new_v4(),
            full_name: "Nobody".into(),
        };

        let enrichment = enricher.enrich_person(&person).await.unwrap();
        assert!(enrichment.film_ids.is_empty());
        assert_eq!(enrichment.role, PrimaryRole::Unassigned);
    }
}
