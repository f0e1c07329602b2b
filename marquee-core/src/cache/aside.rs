use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::CacheKey;
use crate::error::Result;
use crate::storage::CacheStore;

/// Default time-to-live for cached snapshots.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Read-through cache over a [`CacheStore`].
///
/// Concurrent misses on the same key each compute and write; the last write
/// wins.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAside").field("ttl", &self.ttl).finish()
    }
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// A payload that no longer decodes as `T` is logged and recomputed.
    pub async fn get_or_insert_with<T, F, Fut>(&self, key: &CacheKey, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.store.get(key.as_str()).await? {
            Some(bytes) => match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => {
                    debug!("Cache HIT: {}", key);
                    return Ok(value);
                }
                Err(e) => warn!(key = %key, error = %e, "Discarding undecodable cache payload"),
            },
            None => debug!("Cache MISS: {}", key),
        }

        let value = compute().await?;
        let payload = serde_json::to_vec(&value)?;
        self.store.set(key.as_str(), payload, self.ttl).await?;
        debug!("Cache SET: {} (ttl {}s)", key, self.ttl.as_secs());

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::infra::memory::MemoryCache;
    use marquee_model::CatalogIndex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn key() -> CacheKey {
        CacheKey::retrieve(CatalogIndex::Genres, Uuid::nil())
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let store = Arc::new(MemoryCache::new());
        let cache = CacheAside::new(store.clone(), DEFAULT_CACHE_TTL);
        let computed = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: Vec<String> = cache
                .get_or_insert_with(&key(), || async {
                    computed.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["Drama".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(value, vec!["Drama".to_string()]);
        }

        assert_eq!(computed.load(Ordering::SeqCst), 1);
        assert_eq!(store.set_calls(), 1);
    }

    #[tokio::test]
    async fn undecodable_payload_is_recomputed_and_overwritten() {
        let store = Arc::new(MemoryCache::new());
        store
            .put_raw(key().as_str(), b"not json".to_vec(), DEFAULT_CACHE_TTL)
            .await;
        let cache = CacheAside::new(store.clone(), DEFAULT_CACHE_TTL);

        let value: u32 = cache
            .get_or_insert_with(&key(), || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(store.get(key().as_str()).await.unwrap(), Some(b"7".to_vec()));
    }

    #[tokio::test]
    async fn failed_compute_writes_nothing() {
        let store = Arc::new(MemoryCache::new());
        let cache = CacheAside::new(store.clone(), DEFAULT_CACHE_TTL);

        let err = cache
            .get_or_insert_with::<u32, _, _>(&key(), || async {
                Err(CatalogError::NotFound("genres/0".into()))
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.contains(key().as_str()).await);
    }
}
