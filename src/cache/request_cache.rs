use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

use crate::cache::{QueryKey, QueryParams};
use crate::error::AppResult;
use crate::services::transport::Transport;

/// Process-lifetime memoization of outbound queries
///
/// Each [`QueryKey`] maps to a cell that is filled at most once with the decoded
/// payload. Concurrent callers asking for the same key wait on the same cell, so
/// the transport sees a single request per key. A failed request leaves the cell
/// empty and the next caller tries again.
///
/// Entries are never evicted or refreshed.
pub struct RequestCache {
    transport: Arc<dyn Transport>,
    entries: Mutex<HashMap<QueryKey, Arc<OnceCell<Value>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Keys holding a stored payload
    pub entries: usize,
    /// Lookups answered without calling the transport
    pub hits: u64,
    /// Transport calls issued, successful or not
    pub misses: u64,
}

impl RequestCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the payload for `(endpoint, params)`, calling the transport only
    /// if no payload is stored for that key yet
    pub async fn fetch(&self, endpoint: &str, params: &QueryParams) -> AppResult<Value> {
        let key = QueryKey::new(endpoint, params.clone());

        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        if let Some(payload) = cell.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "Request cache hit");
            return Ok(payload.clone());
        }

        let fetched = AtomicBool::new(false);
        let fetched_flag = &fetched;
        let transport = &self.transport;
        let misses = &self.misses;

        let payload = cell
            .get_or_try_init(move || async move {
                fetched_flag.store(true, Ordering::Relaxed);
                misses.fetch_add(1, Ordering::Relaxed);
                transport.get(endpoint, params).await
            })
            .await
            .map_err(|e| {
                tracing::warn!(key = %key, error = %e, "Request failed, not cached");
                e
            })?;

        if fetched.load(Ordering::Relaxed) {
            tracing::debug!(key = %key, "Request cache miss, payload stored");
        } else {
            // Another caller filled the cell while we waited
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "Request cache hit after in-flight request");
        }

        Ok(payload.clone())
    }

    /// Whether a payload is stored for `(endpoint, params)`
    pub async fn contains(&self, endpoint: &str, params: &QueryParams) -> bool {
        let key = QueryKey::new(endpoint, params.clone());
        let entries = self.entries.lock().await;
        entries
            .get(&key)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        CacheStats {
            entries: entries.values().filter(|cell| cell.initialized()).count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::transport::MockTransport;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    const ENDPOINT: &str = "https://tastedive.com/api/similar";

    fn params(title: &str) -> QueryParams {
        QueryParams::new()
            .with("q", title)
            .with("type", "movies")
            .with("limit", 5i64)
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(json!({"Similar": {"Results": []}})));

        let cache = RequestCache::new(Arc::new(transport));

        let first = cache.fetch(ENDPOINT, &params("Heat")).await.unwrap();
        let second = cache.fetch(ENDPOINT, &params("Heat")).await.unwrap();

        assert_eq!(first, second);
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_reordered_params_hit_the_same_entry() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(json!({"Ratings": []})));

        let cache = RequestCache::new(Arc::new(transport));

        let a = QueryParams::new().with("t", "Venom").with("r", "json");
        let b = QueryParams::new().with("r", "json").with("t", "Venom");

        cache.fetch("http://www.omdbapi.com/", &a).await.unwrap();
        cache.fetch("http://www.omdbapi.com/", &b).await.unwrap();

        assert!(cache.contains("http://www.omdbapi.com/", &b).await);
    }

    #[tokio::test]
    async fn test_distinct_keys_each_call_transport() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(2)
            .returning(|endpoint, params| {
                assert_eq!(endpoint, ENDPOINT);
                let q = params.get("q").map(|v| v.to_string()).unwrap_or_default();
                Ok(json!({ "q": q }))
            });

        let cache = RequestCache::new(Arc::new(transport));

        let heat = cache.fetch(ENDPOINT, &params("Heat")).await.unwrap();
        let ronin = cache.fetch(ENDPOINT, &params("Ronin")).await.unwrap();

        assert_eq!(heat, json!({"q": "Heat"}));
        assert_eq!(ronin, json!({"q": "Ronin"}));
        assert_eq!(cache.stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_failed_request_is_not_cached() {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(AppError::ExternalApi("status 503".to_string())));
        transport
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(json!({"ok": true})));

        let cache = RequestCache::new(Arc::new(transport));

        let first = cache.fetch(ENDPOINT, &params("Heat")).await;
        assert!(matches!(first, Err(AppError::ExternalApi(_))));
        assert!(!cache.contains(ENDPOINT, &params("Heat")).await);

        let second = tokio_test::assert_ok!(cache.fetch(ENDPOINT, &params("Heat")).await);
        assert_eq!(second, json!({"ok": true}));

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 1);
    }

    struct SlowTransport {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Transport for SlowTransport {
        async fn get(&self, _endpoint: &str, _params: &QueryParams) -> AppResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(json!({"slow": true}))
        }
    }

    #[tokio::test]
    async fn test_concurrent_fetches_coalesce_into_one_call() {
        let transport = Arc::new(SlowTransport {
            calls: AtomicUsize::new(0),
        });
        let cache = RequestCache::new(transport.clone());
        let p = params("Heat");

        let results =
            futures::future::join_all((0..8).map(|_| cache.fetch(ENDPOINT, &p))).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }
}
