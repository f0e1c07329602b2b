//! Elasticsearch document store.

use std::fmt;

use async_trait::async_trait;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::{Elasticsearch, GetParts, SearchParts};
use marquee_model::CatalogIndex;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::query::SearchRequest;
use crate::storage::DocumentStore;

pub struct ElasticStore {
    client: Elasticsearch,
    url: String,
}

impl fmt::Debug for ElasticStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticStore")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl ElasticStore {
    /// Builds a client for a single node. No request is made until first use.
    pub fn connect(url: &str) -> Result<Self> {
        let parsed_url: elasticsearch::http::Url = url.parse().map_err(|e| {
            CatalogError::Backend(format!(
                "Invalid Elasticsearch URL {}: {}",
                super::endpoint(url),
                e
            ))
        })?;

        let transport = TransportBuilder::new(SingleNodeConnectionPool::new(parsed_url))
            .build()
            .map_err(|e| CatalogError::Backend(format!("Failed to build transport: {}", e)))?;

        Ok(Self {
            client: Elasticsearch::new(transport),
            url: url.to_string(),
        })
    }

    /// Raw client, for index provisioning.
    pub fn client(&self) -> &Elasticsearch {
        &self.client
    }
}

fn transport_error(e: elasticsearch::Error) -> CatalogError {
    CatalogError::Transient(e.to_string())
}

fn status_error(status: u16, body: String, what: &str) -> CatalogError {
    match status {
        404 => CatalogError::NotFound(what.to_string()),
        _ if body.contains("index_not_found_exception") => CatalogError::NotFound(what.to_string()),
        429 | 502 | 503 | 504 => {
            CatalogError::Transient(format!("{} returned status {}", what, status))
        }
        _ => CatalogError::Backend(format!("{} failed (status {}): {}", what, status, body)),
    }
}

#[async_trait]
impl DocumentStore for ElasticStore {
    async fn get_by_id(&self, index: CatalogIndex, id: Uuid) -> Result<Value> {
        let what = format!("{}/{}", index, id);
        let doc_id = id.to_string();

        let response = self
            .client
            .get(GetParts::IndexId(index.as_str(), &doc_id))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body, &what));
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Backend(format!("Failed to parse get response: {}", e)))?;

        match body.get_mut("_source").map(Value::take) {
            Some(source) if !source.is_null() => Ok(source),
            _ => Err(CatalogError::NotFound(what)),
        }
    }

    async fn search(&self, index: CatalogIndex, request: &SearchRequest) -> Result<Vec<Value>> {
        let what = format!("{} search", index);
        let sort: Vec<&str> = request.sort.iter().map(String::as_str).collect();
        let indices = [index.as_str()];

        let mut search = self
            .client
            .search(SearchParts::Index(&indices))
            .body(request.body.clone().unwrap_or_else(|| json!({})));
        if !sort.is_empty() {
            search = search.sort(&sort);
        }
        if let Some(from) = request.from {
            search = search.from(from as i64);
        }
        if let Some(size) = request.size {
            search = search.size(size as i64);
        }

        debug!(index = %index, ?request, "Dispatching search");
        let response = search.send().await.map_err(transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body, &what));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Backend(format!("Failed to parse search response: {}", e)))?;

        let sources: Vec<Value> = body
            .get("hits")
            .and_then(|h| h.get("hits"))
            .and_then(|h| h.as_array())
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit.get("_source").cloned())
                    .collect()
            })
            .unwrap_or_default();

        if sources.is_empty() {
            return Err(CatalogError::NotFound(what));
        }
        Ok(sources)
    }
}
