//! Storage adapter contracts.
//!
//! Adapters report connectivity failures as [`CatalogError::Transient`] so
//! that [`Retrying`] can tell them apart from everything else.
//!
//! [`CatalogError::Transient`]: crate::CatalogError::Transient

mod retry;

pub use retry::{RetryPolicy, Retrying};

use std::time::Duration;

use async_trait::async_trait;
use marquee_model::CatalogIndex;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::query::SearchRequest;

/// Read access to the document search backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the document source. Absent documents are `NotFound`.
    async fn get_by_id(&self, index: CatalogIndex, id: Uuid) -> Result<Value>;

    /// Returns the source of every hit, in backend order. Zero hits and a
    /// missing index are both `NotFound`.
    async fn search(&self, index: CatalogIndex, request: &SearchRequest) -> Result<Vec<Value>>;
}

/// Key-value cache with per-entry expiry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// An absent key is `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;
}
