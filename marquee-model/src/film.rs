use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre reference embedded in a film.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenreInFilm {
    #[serde(alias = "id")]
    pub uuid: Uuid,
    pub name: String,
}

/// Person reference embedded in a film (actor, writer or director).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PersonInFilm {
    #[serde(alias = "id")]
    pub uuid: Uuid,
    #[serde(alias = "name")]
    pub full_name: String,
}

/// Film with complete information, genres and crew resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Film {
    pub uuid: Uuid,
    pub title: String,
    pub imdb_rating: f64,
    pub description: String,
    pub genre: Vec<GenreInFilm>,
    pub actors: Vec<PersonInFilm>,
    pub writers: Vec<PersonInFilm>,
    pub directors: Vec<PersonInFilm>,
}

/// List projection of a film.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilmBrief {
    pub uuid: Uuid,
    pub title: String,
    pub imdb_rating: f64,
}

/// Ordered page of film projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct FilmList(pub Vec<FilmBrief>);

impl From<Vec<FilmBrief>> for FilmList {
    fn from(items: Vec<FilmBrief>) -> Self {
        Self(items)
    }
}
