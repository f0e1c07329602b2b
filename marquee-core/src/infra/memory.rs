//! In-process stores for tests and `--in-memory` runs.
//!
//! [`MemoryDocumentStore`] evaluates the subset of the query DSL that
//! [`crate::query`] produces: `bool` (`filter`, `must`, `should`), `term`,
//! `terms`, `nested`, `match_phrase`, `query_string` and `match_all`, plus
//! `_source`, `sort`, `from` and `size`. Like the real backend, a search
//! without `size` returns at most ten hits.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use marquee_model::CatalogIndex;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::query::SearchRequest;
use crate::storage::{CacheStore, DocumentStore};

const DEFAULT_SEARCH_SIZE: u64 = 10;

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    indices: RwLock<HashMap<CatalogIndex, Vec<Value>>>,
    get_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl MemoryDocumentStore {
    /// Empty store with all catalog indices present.
    pub fn new() -> Self {
        Self::seeded(std::iter::empty())
    }

    pub fn seeded(documents: impl IntoIterator<Item = (CatalogIndex, Value)>) -> Self {
        let mut indices: HashMap<CatalogIndex, Vec<Value>> = CatalogIndex::all()
            .iter()
            .map(|index| (*index, Vec::new()))
            .collect();
        for (index, document) in documents {
            indices.entry(index).or_default().push(document);
        }
        Self {
            indices: RwLock::new(indices),
            ..Self::default()
        }
    }

    pub async fn insert(&self, index: CatalogIndex, document: Value) {
        self.indices
            .write()
            .await
            .entry(index)
            .or_default()
            .push(document);
    }

    /// Loads `{"movies": [...], "persons": [...], "genres": [...]}`.
    /// Returns the number of documents added.
    pub async fn load_seed(&self, seed: Value) -> Result<usize> {
        let Value::Object(mut by_index) = seed else {
            return Err(CatalogError::MalformedDocument(
                "seed must be an object keyed by index name".into(),
            ));
        };

        let mut loaded = 0;
        for index in CatalogIndex::all() {
            let Some(documents) = by_index.remove(index.as_str()) else {
                continue;
            };
            let Value::Array(documents) = documents else {
                return Err(CatalogError::MalformedDocument(format!(
                    "seed entry for {} must be a list",
                    index
                )));
            };
            loaded += documents.len();
            self.indices
                .write()
                .await
                .entry(*index)
                .or_default()
                .extend(documents);
        }
        Ok(loaded)
    }

    pub async fn drop_index(&self, index: CatalogIndex) {
        self.indices.write().await.remove(&index);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_by_id(&self, index: CatalogIndex, id: Uuid) -> Result<Value> {
        self.get_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let wanted = id.to_string();
        let indices = self.indices.read().await;
        indices
            .get(&index)
            .and_then(|docs| {
                docs.iter()
                    .find(|doc| doc.get("id").and_then(Value::as_str) == Some(wanted.as_str()))
            })
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("{}/{}", index, id)))
    }

    async fn search(&self, index: CatalogIndex, request: &SearchRequest) -> Result<Vec<Value>> {
        self.search_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let indices = self.indices.read().await;
        let docs = indices
            .get(&index)
            .ok_or_else(|| CatalogError::NotFound(format!("index {}", index)))?;

        let empty = Value::Object(Map::new());
        let body = request.body.as_ref().unwrap_or(&empty);

        let mut hits: Vec<&Value> = match body.get("query") {
            Some(query) => docs.iter().filter(|doc| matches(query, doc)).collect(),
            None => docs.iter().collect(),
        };

        let sort_keys = match &request.sort {
            Some(param) => parse_sort_param(param),
            None => body.get("sort").map(parse_sort_body).unwrap_or_default(),
        };
        if !sort_keys.is_empty() {
            hits.sort_by(|a, b| compare_by(&sort_keys, a, b));
        }

        let from = request
            .from
            .or_else(|| body.get("from").and_then(Value::as_u64))
            .unwrap_or(0) as usize;
        let size = request
            .size
            .or_else(|| body.get("size").and_then(Value::as_u64))
            .unwrap_or(DEFAULT_SEARCH_SIZE) as usize;

        let source_fields: Option<Vec<&str>> = body
            .get("_source")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect());

        let page: Vec<Value> = hits
            .into_iter()
            .skip(from)
            .take(size)
            .map(|doc| project(doc, source_fields.as_deref()))
            .collect();

        if page.is_empty() {
            return Err(CatalogError::NotFound(format!("{} search", index)));
        }
        Ok(page)
    }
}

fn project(doc: &Value, fields: Option<&[&str]>) -> Value {
    match (fields, doc) {
        (Some(fields), Value::Object(map)) => Value::Object(
            map.iter()
                .filter(|(key, _)| fields.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        _ => doc.clone(),
    }
}

/// Leaf values at a dotted path, flattening arrays along the way. A trailing
/// `.raw` keyword subfield resolves to its parent field.
fn values_at<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let path = path.strip_suffix(".raw").unwrap_or(path);
    let mut current = vec![doc];
    for segment in path.split('.') {
        current = current
            .into_iter()
            .filter_map(|value| value.get(segment))
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .collect();
    }
    current
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect()
}

fn single_field(clause: &Value) -> Option<(&str, &Value)> {
    clause
        .as_object()
        .and_then(|map| map.iter().next())
        .map(|(field, value)| (field.as_str(), value))
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Null => None,
        other => Some(other.to_string().to_lowercase()),
    }
}

fn matches(query: &Value, doc: &Value) -> bool {
    let Some((kind, clause)) = single_field(query) else {
        return true;
    };

    match kind {
        "match_all" => true,
        "bool" => {
            let all = |key: &str| {
                clause
                    .get(key)
                    .and_then(Value::as_array)
                    .is_none_or(|qs| qs.iter().all(|q| matches(q, doc)))
            };
            let should = clause.get("should").and_then(Value::as_array);
            let required = clause.get("filter").is_some() || clause.get("must").is_some();
            let should_ok = match should {
                Some(qs) if !required => qs.iter().any(|q| matches(q, doc)),
                _ => true,
            };
            all("filter") && all("must") && should_ok
        }
        "term" => single_field(clause).is_some_and(|(field, expected)| {
            let expected = expected.get("value").unwrap_or(expected);
            values_at(doc, field).into_iter().any(|v| v == expected)
        }),
        "terms" => single_field(clause).is_some_and(|(field, expected)| {
            let expected = expected.as_array().map(Vec::as_slice).unwrap_or_default();
            values_at(doc, field)
                .into_iter()
                .any(|v| expected.contains(v))
        }),
        "nested" => clause
            .get("query")
            .is_some_and(|inner| matches(inner, doc)),
        "match_phrase" => single_field(clause).is_some_and(|(field, phrase)| {
            let Some(phrase) = text_of(phrase.get("query").unwrap_or(phrase)) else {
                return false;
            };
            values_at(doc, field)
                .into_iter()
                .filter_map(text_of)
                .any(|text| text.contains(&phrase))
        }),
        "query_string" => {
            let terms: Vec<String> = clause
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            let fields: Vec<&str> = clause
                .get("fields")
                .and_then(Value::as_array)
                .map(|fs| fs.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            fields.iter().any(|field| {
                values_at(doc, field)
                    .into_iter()
                    .filter_map(text_of)
                    .any(|text| terms.iter().any(|term| text.contains(term.as_str())))
            })
        }
        _ => false,
    }
}

type SortKey = (String, bool);

fn parse_sort_param(param: &str) -> Vec<SortKey> {
    param
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((field, order)) => (field.to_string(), order.eq_ignore_ascii_case("desc")),
            None => (part.to_string(), false),
        })
        .collect()
}

fn parse_sort_body(sort: &Value) -> Vec<SortKey> {
    let entries = match sort {
        Value::Array(entries) => entries.iter().collect(),
        other => vec![other],
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(field) => Some((field.clone(), false)),
            Value::Object(map) => map.iter().next().map(|(field, spec)| {
                let order = spec.get("order").and_then(Value::as_str).or(spec.as_str());
                (field.clone(), order == Some("desc"))
            }),
            _ => None,
        })
        .collect()
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn compare_by(keys: &[SortKey], a: &Value, b: &Value) -> Ordering {
    for (field, descending) in keys {
        let left = values_at(a, field).into_iter().find(|v| !v.is_null());
        let right = values_at(b, field).into_iter().find(|v| !v.is_null());
        let ordering = match (left, right) {
            // Missing values sort last in either direction.
            (Some(_), Some(_)) if *descending => compare_values(right, left),
            _ => compare_values(left, right),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[derive(Debug)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes without going through the cache-aside path.
    pub async fn put_raw(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        self.entries.write().await.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(AtomicOrdering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.sets.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, AtomicOrdering::SeqCst);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.sets.fetch_add(1, AtomicOrdering::SeqCst);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}
