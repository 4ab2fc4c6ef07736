// src/application/ports/cache.rs
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    Connection(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Time-expiring string store used for cache-aside lookups.
#[async_trait]
pub trait LookupCache: Send + Sync {
    /// Expired or unreachable entries read as `None`.
    async fn get(&self, key: &str) -> Option<String>;
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
