use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use marquee_model::CatalogIndex;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{CacheStore, DocumentStore};
use crate::error::{CatalogError, Result};
use crate::query::SearchRequest;

/// Bounded exponential backoff for connectivity failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls including the first one. Zero behaves as one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry that follows failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(multiplier).min(self.max_delay)
    }

    /// Runs `call` until it succeeds, fails with a non-transient error, or
    /// the attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "Backend call recovered after retry");
                    }
                    return Ok(value);
                }
                Err(CatalogError::Transient(message)) => {
                    if attempt >= max_attempts {
                        error!(
                            operation,
                            attempts = attempt,
                            error = %message,
                            "Backend unavailable, giving up"
                        );
                        return Err(CatalogError::Unavailable {
                            operation: operation.to_string(),
                            attempts: attempt,
                            message,
                        });
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %message,
                        "Backend call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(other) => return Err(other),
            }
        }
    }
}

/// Store decorator applying a [`RetryPolicy`] to every call.
#[derive(Debug, Clone)]
pub struct Retrying<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> Retrying<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for Retrying<S> {
    async fn get_by_id(&self, index: CatalogIndex, id: Uuid) -> Result<Value> {
        self.policy
            .run("document get", || self.inner.get_by_id(index, id))
            .await
    }

    async fn search(&self, index: CatalogIndex, request: &SearchRequest) -> Result<Vec<Value>> {
        self.policy
            .run("document search", || self.inner.search(index, request))
            .await
    }
}

#[async_trait]
impl<S: CacheStore> CacheStore for Retrying<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.policy.run("cache get", || self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.policy
            .run("cache set", || self.inner.set(key, value.clone(), ttl))
            .await
    }
}
