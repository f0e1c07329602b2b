use async_trait::async_trait;
use marquee_model::{
    Film, FilmBrief, FilmList, Genre, GenreList, Person, PersonList,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::documents::{self, FilmDocument, GenreDocument, PersonDocument};
use crate::enrich::Enricher;
use crate::error::Result;

/// A fully resolved catalog entity, built from one raw index document.
#[async_trait]
pub trait CinemaObject: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Builds the entity, running whatever enrichment the shape needs.
    async fn from_document(document: Value, enricher: &dyn Enricher) -> Result<Self>;
}

/// An ordered list of [`CinemaObject`] list projections.
pub trait CinemaObjectList:
    Serialize + DeserializeOwned + From<Vec<Self::Item>> + Send + Sync + 'static
{
    type Item: CinemaObject;
}

#[async_trait]
impl CinemaObject for Film {
    async fn from_document(document: Value, enricher: &dyn Enricher) -> Result<Self> {
        let film: FilmDocument = documents::parse("film", document)?;
        let enrichment = enricher.enrich_film(&film).await?;

        Ok(Film {
            uuid: film.id,
            title: film.title,
            imdb_rating: film.imdb_rating.unwrap_or_default(),
            description: film.description.unwrap_or_default(),
            genre: enrichment.genre,
            actors: film.actors,
            writers: film.writers,
            directors: enrichment.directors,
        })
    }
}

#[async_trait]
impl CinemaObject for FilmBrief {
    async fn from_document(document: Value, _enricher: &dyn Enricher) -> Result<Self> {
        let film: FilmDocument = documents::parse("film", document)?;
        Ok(FilmBrief {
            uuid: film.id,
            title: film.title,
            imdb_rating: film.imdb_rating.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl CinemaObject for Person {
    async fn from_document(document: Value, enricher: &dyn Enricher) -> Result<Self> {
        let person: PersonDocument = documents::parse("person", document)?;
        let enrichment = enricher.enrich_person(&person).await?;

        Ok(Person {
            uuid: person.id,
            full_name: person.full_name,
            role: enrichment.role,
            film_ids: enrichment.film_ids,
        })
    }
}

#[async_trait]
impl CinemaObject for Genre {
    async fn from_document(document: Value, _enricher: &dyn Enricher) -> Result<Self> {
        let genre: GenreDocument = documents::parse("genre", document)?;
        Ok(Genre {
            uuid: genre.id,
            name: genre.name,
            description: genre.description.unwrap_or_default(),
        })
    }
}

impl CinemaObjectList for FilmList {
    type Item = FilmBrief;
}

impl CinemaObjectList for PersonList {
    type Item = Person;
}

impl CinemaObjectList for GenreList {
    type Item = Genre;
}
