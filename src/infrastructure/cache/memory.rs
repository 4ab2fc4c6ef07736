// src/infrastructure/cache/memory.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::cache::{CacheError, LookupCache};

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Process-local lookup cache. Entries vanish on restart.
#[derive(Default)]
pub struct InMemoryLookupCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryLookupCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LookupCache for InMemoryLookupCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;
        if !entry.is_expired() {
            return Some(entry.value.clone());
        }
        drop(store);

        let mut store = self.store.write().await;
        if store.get(key).is_some_and(CacheEntry::is_expired) {
            store.remove(key);
        }
        None
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.retain(|_, entry| !entry.is_expired());
        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let cache = InMemoryLookupCache::new();
        cache
            .put("post.by-id.1", "{}", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("post.by-id.1").await.as_deref(), Some("{}"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn remove_drops_the_entry() {
        let cache = InMemoryLookupCache::new();
        cache
            .put("tag.by-slug.rust", "1", Duration::from_secs(60))
            .await
            .unwrap();
        cache.remove("tag.by-slug.rust").await.unwrap();
        assert_eq!(cache.get("tag.by-slug.rust").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entries_read_as_missing() {
        let cache = InMemoryLookupCache::new();
        cache
            .put("author.by-id.3", "x", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("author.by-id.3").await, None);
        assert!(cache.is_empty().await);
    }
}
