//! Search bodies for the backend query DSL.

use serde_json::{Value, json};
use uuid::Uuid;

/// Upper bound on films returned for a single person.
pub const PERSON_FILMS_CEILING: u64 = 1000;

/// `_source` fields for a person's filmography listing.
pub const PERSON_FILM_LIST_FIELDS: &[&str] = &["id", "title", "imdb_rating"];

/// `_source` fields needed to infer a person's primary role.
pub const PERSON_ROLE_FIELDS: &[&str] =
    &["id", "actors_names", "writers_names", "director"];

fn filtered(clause: Value) -> Value {
    json!({ "query": { "bool": { "filter": [clause] } } })
}

pub fn films_by_genre(genre_name: &str) -> Value {
    filtered(json!({ "term": { "genre": genre_name } }))
}

/// Films where the person is credited as actor or writer by id, or as
/// director by name, best rated first.
pub fn films_by_person(person_id: Uuid, full_name: &str, fields: &[&str]) -> Value {
    let id = person_id.to_string();
    let mut body = filtered(json!({
        "bool": {
            "should": [
                { "nested": { "path": "actors", "query": { "term": { "actors.id": id } } } },
                { "nested": { "path": "writers", "query": { "term": { "writers.id": id } } } },
                { "match_phrase": { "director": full_name } },
            ]
        }
    }));
    body["_source"] = json!(fields);
    body["sort"] = json!([{ "imdb_rating": { "order": "desc" } }]);
    body["from"] = json!(0);
    body["size"] = json!(PERSON_FILMS_CEILING);
    body
}

pub fn genres_by_film(genre_names: &[String]) -> Value {
    filtered(json!({ "terms": { "name.raw": genre_names } }))
}

pub fn directors_by_film(director_names: &[String]) -> Value {
    filtered(json!({ "terms": { "full_name.raw": director_names } }))
}

pub fn search_data(query: &str, fields: &[String]) -> Value {
    filtered(json!({ "query_string": { "query": query, "fields": fields } }))
}
