//! Typed views over raw index documents.
//!
//! Documents come back from the search backend as loose JSON. These views
//! pick out the fields the services need and tolerate the shapes the loader
//! produces in practice: missing optional fields, `null`, and name fields
//! stored either as a single string or as a list.

use marquee_model::PersonInFilm;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmDocument {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub director: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub actors_names: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub writers_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actors: Vec<PersonInFilm>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub writers: Vec<PersonInFilm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonDocument {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreDocument {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Deserializes a raw document into one of the typed views.
pub fn parse<T: for<'de> Deserialize<'de>>(kind: &str, document: Value) -> Result<T> {
    serde_json::from_value(document)
        .map_err(|e| CatalogError::MalformedDocument(format!("{}: {}", kind, e)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(name)) if name.is_empty() => Vec::new(),
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
