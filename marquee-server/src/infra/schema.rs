//! Index provisioning for the search backend.
//!
//! Runs once at startup. Each catalog index is created with the `ru_en`
//! analyzer and a strict mapping; an index that already exists is left
//! untouched.

use elasticsearch::Elasticsearch;
use elasticsearch::indices::{IndicesCreateParts, IndicesExistsParts};
use marquee_core::infra::ElasticStore;
use marquee_core::{CatalogError, Result, RetryPolicy};
use marquee_model::CatalogIndex;
use serde_json::{Value, json};
use tracing::info;

/// Shared analysis settings: English and Russian stop words and stemming.
pub fn index_settings() -> Value {
    json!({
        "refresh_interval": "1s",
        "analysis": {
            "filter": {
                "english_stop": { "type": "stop", "stopwords": "_english_" },
                "english_stemmer": { "type": "stemmer", "language": "english" },
                "english_possessive_stemmer": {
                    "type": "stemmer",
                    "language": "possessive_english"
                },
                "russian_stop": { "type": "stop", "stopwords": "_russian_" },
                "russian_stemmer": { "type": "stemmer", "language": "russian" }
            },
            "analyzer": {
                "ru_en": {
                    "tokenizer": "standard",
                    "filter": [
                        "lowercase",
                        "english_stop",
                        "english_stemmer",
                        "english_possessive_stemmer",
                        "russian_stop",
                        "russian_stemmer"
                    ]
                }
            }
        }
    })
}

fn analyzed() -> Value {
    json!({ "type": "text", "analyzer": "ru_en" })
}

fn analyzed_with_raw() -> Value {
    json!({ "type": "text", "analyzer": "ru_en", "fields": { "raw": { "type": "keyword" } } })
}

fn credit() -> Value {
    json!({
        "type": "nested",
        "dynamic": "strict",
        "properties": {
            "id": { "type": "keyword" },
            "name": analyzed()
        }
    })
}

pub fn index_mappings(index: CatalogIndex) -> Value {
    let properties = match index {
        CatalogIndex::Movies => json!({
            "id": { "type": "keyword" },
            "imdb_rating": { "type": "float" },
            "genre": { "type": "keyword" },
            "title": analyzed_with_raw(),
            "description": analyzed(),
            "director": analyzed(),
            "actors_names": analyzed(),
            "writers_names": analyzed(),
            "actors": credit(),
            "writers": credit()
        }),
        CatalogIndex::Persons => json!({
            "id": { "type": "keyword" },
            "full_name": analyzed_with_raw()
        }),
        CatalogIndex::Genres => json!({
            "id": { "type": "keyword" },
            "name": analyzed_with_raw(),
            "description": analyzed()
        }),
    };

    json!({ "dynamic": "strict", "properties": properties })
}

/// Full create-index body for `index`.
pub fn index_definition(index: CatalogIndex) -> Value {
    json!({
        "settings": index_settings(),
        "mappings": index_mappings(index),
    })
}

/// Creates every catalog index that does not exist yet, retrying while the
/// backend is unreachable.
pub async fn provision_indices(store: &ElasticStore, policy: &RetryPolicy) -> Result<()> {
    for index in CatalogIndex::all() {
        policy
            .run("index provisioning", || ensure_index(store.client(), *index))
            .await?;
    }
    Ok(())
}

async fn ensure_index(client: &Elasticsearch, index: CatalogIndex) -> Result<()> {
    let exists = client
        .indices()
        .exists(IndicesExistsParts::Index(&[index.as_str()]))
        .send()
        .await
        .map_err(|e| CatalogError::Transient(e.to_string()))?;

    if exists.status_code().is_success() {
        info!(index = %index, "Index already exists, skipping creation");
        return Ok(());
    }

    let response = client
        .indices()
        .create(IndicesCreateParts::Index(index.as_str()))
        .body(index_definition(index))
        .send()
        .await
        .map_err(|e| CatalogError::Transient(e.to_string()))?;

    let status = response.status_code();
    if status.is_success() {
        info!(index = %index, "Index created");
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    // Another instance may have won the race between exists and create.
    if body.contains("resource_already_exists_exception") {
        info!(index = %index, "Index already exists, skipping creation");
        return Ok(());
    }

    Err(CatalogError::Backend(format!(
        "creating index {} failed (status {}): {}",
        index,
        status.as_u16(),
        body
    )))
}
