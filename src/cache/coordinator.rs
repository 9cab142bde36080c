//! Request Coordinator Module
//!
//! Wraps an async fetch with cache lookup, in-flight deduplication and cache
//! population.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{BoundedCache, CacheStats};
use crate::error::FetchError;

/// Settlement of one fetch, cloneable to every waiter.
type PendingFetch<V> = Shared<BoxFuture<'static, Result<V, FetchError>>>;

/// Cache and in-flight registry, always mutated together under one lock.
struct Registry<K, V> {
    cache: BoundedCache<K, V>,
    in_flight: HashMap<K, PendingFetch<V>>,
    stats: CacheStats,
}

// == Request Coordinator ==
/// Guarantees at most one fetch per key is in flight and serves repeated
/// requests from the cache or from the pending fetch.
///
/// Cloning is cheap and yields a handle onto the same cache and registry.
///
/// The producer runs on its own task, so a fetch settles into the cache even
/// when every caller waiting on it has been dropped.
pub struct RequestCoordinator<K, V> {
    /// Label used in log lines
    name: &'static str,
    registry: Arc<Mutex<Registry<K, V>>>,
}

impl<K, V> Clone for RequestCoordinator<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<K, V> Debug for RequestCoordinator<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCoordinator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<K, V> RequestCoordinator<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a coordinator backed by a cache of `capacity` entries.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            registry: Arc::new(Mutex::new(Registry {
                cache: BoundedCache::new(capacity),
                in_flight: HashMap::new(),
                stats: CacheStats::new(),
            })),
        }
    }

    // == Resolve ==
    /// Resolves `key`, invoking `producer` only if the key is neither cached
    /// nor already being fetched.
    ///
    /// Every caller that joins a pending fetch observes the same settlement.
    /// Failures are never cached; the next call after a failure fetches again.
    pub async fn resolve<F, Fut>(&self, key: K, producer: F) -> Result<V, FetchError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let pending = {
            let mut guard = self.registry.lock().await;
            let registry = &mut *guard;

            if let Some(value) = registry.cache.get(&key) {
                registry.stats.record_hit();
                debug!(cache = self.name, ?key, "cache hit");
                return Ok(value.clone());
            }

            match registry.in_flight.get(&key) {
                Some(pending) => {
                    registry.stats.record_coalesced();
                    debug!(cache = self.name, ?key, "joining in-flight fetch");
                    pending.clone()
                }
                None => {
                    registry.stats.record_miss();
                    debug!(cache = self.name, ?key, "cache miss, fetching");
                    // Spawned under the lock so settlement cannot race registration
                    let pending = self.spawn_fetch(key.clone(), producer());
                    registry.in_flight.insert(key, pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    fn spawn_fetch<Fut>(&self, key: K, fetch: Fut) -> PendingFetch<V>
    where
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let registry = Arc::clone(&self.registry);
        let name = self.name;

        let handle = tokio::spawn(async move {
            let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Aborted("producer panicked".to_string())),
            };

            let mut guard = registry.lock().await;
            let registry = &mut *guard;
            registry.in_flight.remove(&key);

            match &result {
                Ok(value) => {
                    if let Some(evicted) = registry.cache.set(key.clone(), value.clone()) {
                        debug!(cache = name, ?evicted, "evicted oldest entry");
                    }
                }
                Err(err) => {
                    registry.stats.record_failure();
                    warn!(cache = name, ?key, error = %err, "fetch failed");
                }
            }

            result
        });

        async move {
            handle
                .await
                .unwrap_or_else(|err| Err(FetchError::Aborted(err.to_string())))
        }
        .boxed()
        .shared()
    }

    // == Cached ==
    /// Returns the cached value for `key` without fetching.
    pub async fn cached(&self, key: &K) -> Option<V> {
        self.registry.lock().await.cache.get(key).cloned()
    }

    // == Clear ==
    /// Drops every cached entry. Fetches still in flight will settle into
    /// the emptied cache.
    pub async fn clear(&self) {
        self.registry.lock().await.cache.clear();
    }

    /// Number of fetches currently in flight.
    pub async fn in_flight_len(&self) -> usize {
        self.registry.lock().await.in_flight.len()
    }

    // == Stats ==
    /// Returns a snapshot of the coordinator statistics.
    pub async fn stats(&self) -> CacheStats {
        let registry = self.registry.lock().await;
        let mut stats = registry.stats.clone();
        stats.evictions = registry.cache.evictions();
        stats.total_entries = registry.cache.len();
        stats.in_flight = registry.in_flight.len();
        stats
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
