//! Redis cache store.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::ConnectionManager};
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::storage::CacheStore;

pub struct RedisCache {
    manager: ConnectionManager,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache").finish()
    }
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CatalogError::Backend(format!("Invalid Redis URL: {}", e)))?;

        let manager = ConnectionManager::new(client).await.map_err(redis_error)?;
        info!("Connected to Redis at {}", super::endpoint(redis_url));

        Ok(Self { manager })
    }
}

fn redis_error(e: RedisError) -> CatalogError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        CatalogError::Transient(e.to_string())
    } else {
        CatalogError::Backend(e.to_string())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(redis_error)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .map_err(redis_error)
    }
}
