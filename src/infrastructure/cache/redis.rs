// src/infrastructure/cache/redis.rs
use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Pool, Runtime};
use redis::AsyncCommands;
use tracing::warn;

use crate::application::ports::cache::{CacheError, LookupCache};

/// Lookup cache shared between instances through Redis.
#[derive(Clone)]
pub struct RedisLookupCache {
    pool: Pool,
    prefix: String,
}

impl RedisLookupCache {
    /// Builds a pool from a redis URL (e.g. `redis://:password@host:6379/0`).
    /// Keys are namespaced with `prefix`.
    pub fn from_url(url: &str, prefix: impl Into<String>) -> Result<Self, CacheError> {
        let pool = DeadpoolConfig::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| CacheError::Connection(err.to_string()))?;
        Ok(Self {
            pool,
            prefix: prefix.into(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CacheError::Connection(err.to_string()))
    }
}

#[async_trait]
impl LookupCache for RedisLookupCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(key, error = %err, "redis unavailable, treating as cache miss");
                return None;
            }
        };
        match conn.get::<_, Option<String>>(self.key(key)).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "redis GET failed");
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(self.key(key), value, seconds)
            .await
            .map_err(|err| CacheError::Operation(err.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(self.key(key))
            .await
            .map_err(|err| CacheError::Operation(err.to_string()))
    }
}
