// src/application/cache.rs
use crate::application::ApplicationResult;
use crate::application::ports::LookupCachePort;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache keys of the form `<kind>.by-id.<id>` and `<kind>.by-slug.<slug>`.
pub struct CacheKey;

impl CacheKey {
    pub const POST: &'static str = "post";
    pub const CATEGORY: &'static str = "category";
    pub const TAG: &'static str = "tag";
    pub const AUTHOR: &'static str = "author";

    #[must_use]
    pub fn by_id(kind: &str, id: impl Display) -> String {
        format!("{kind}.by-id.{id}")
    }

    #[must_use]
    pub fn by_slug(kind: &str, slug: impl Display) -> String {
        format!("{kind}.by-slug.{slug}")
    }
}

/// Read-through lookups over a [`LookupCache`](crate::application::ports::cache::LookupCache).
///
/// Values are stored as JSON for a fixed TTL. Absent results are never
/// cached, and cache failures only log: the loader stays the source of truth.
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<LookupCachePort>,
    ttl: Duration,
}

impl CacheAside {
    #[must_use]
    pub const fn new(cache: Arc<LookupCachePort>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get_or_load<T, F, Fut>(&self, key: &str, loader: F) -> ApplicationResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApplicationResult<Option<T>>>,
    {
        if let Some(raw) = self.cache.get(key).await {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(Some(value));
                }
                Err(err) => {
                    warn!(key, error = %err, "discarding undecodable cache entry");
                    self.remove(key).await;
                }
            }
        }

        let loaded = loader().await?;
        if let Some(value) = &loaded {
            match serde_json::to_string(value) {
                Ok(raw) => {
                    if let Err(err) = self.cache.put(key, &raw, self.ttl).await {
                        warn!(key, error = %err, "failed to populate cache");
                    }
                }
                Err(err) => warn!(key, error = %err, "failed to encode cache entry"),
            }
        }
        Ok(loaded)
    }

    pub async fn invalidate<I, K>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.remove(key.as_ref()).await;
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(err) = self.cache.remove(key).await {
            warn!(key, error = %err, "failed to invalidate cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::application::ports::cache::{CacheError, LookupCache};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl LookupCache for MapCache {
        async fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().await.get(key).cloned()
        }

        async fn put(&self, key: &str, value: &str, _ttl: Duration) -> Result<(), CacheError> {
            self.entries
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), CacheError> {
            self.entries.lock().await.remove(key);
            Ok(())
        }
    }

    fn cache_aside() -> (Arc<MapCache>, CacheAside) {
        let store = Arc::new(MapCache::default());
        let cache = CacheAside::new(store.clone(), DEFAULT_CACHE_TTL);
        (store, cache)
    }

    #[test]
    fn keys_follow_kind_and_lookup_shape() {
        assert_eq!(CacheKey::by_id(CacheKey::POST, 42), "post.by-id.42");
        assert_eq!(
            CacheKey::by_slug(CacheKey::CATEGORY, "rust"),
            "category.by-slug.rust"
        );
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let (_, cache) = cache_aside();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let value: Option<String> = cache
                .get_or_load("tag.by-id.1", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApplicationError>(Some("rust".to_string()))
                })
                .await
                .unwrap();
            assert_eq!(value.as_deref(), Some("rust"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn absent_values_are_not_cached() {
        let (store, cache) = cache_aside();
        let value: Option<String> = cache
            .get_or_load("tag.by-id.9", || async { Ok::<_, ApplicationError>(None) })
            .await
            .unwrap();
        assert!(value.is_none());
        assert!(store.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn loader_errors_propagate_and_skip_the_cache() {
        let (store, cache) = cache_aside();
        let result: ApplicationResult<Option<String>> = cache
            .get_or_load("tag.by-id.2", || async {
                Err(ApplicationError::infrastructure("db down"))
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Infrastructure(_))));
        assert!(store.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn invalidation_forces_a_reload() {
        let (_, cache) = cache_aside();
        let _: Option<u32> = cache
            .get_or_load("author.by-id.1", || async { Ok::<_, ApplicationError>(Some(1)) })
            .await
            .unwrap();
        cache.invalidate(["author.by-id.1"]).await;
        let reloaded: Option<u32> = cache
            .get_or_load("author.by-id.1", || async { Ok::<_, ApplicationError>(Some(2)) })
            .await
            .unwrap();
        assert_eq!(reloaded, Some(2));
    }

    #[tokio::test]
    async fn undecodable_entries_are_replaced() {
        let (store, cache) = cache_aside();
        store
            .put("post.by-id.5", "not json", DEFAULT_CACHE_TTL)
            .await
            .unwrap();
        let value: Option<u32> = cache
            .get_or_load("post.by-id.5", || async { Ok::<_, ApplicationError>(Some(5)) })
            .await
            .unwrap();
        assert_eq!(value, Some(5));
        assert_eq!(
            store.entries.lock().await.get("post.by-id.5").map(String::as_str),
            Some("5")
        );
    }
}
