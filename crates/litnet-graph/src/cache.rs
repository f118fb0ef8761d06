//! Process-wide cache for derived networks.
//!
//! Entries are keyed by a typed [`CacheKey`] and expire after a TTL. The
//! in-memory cache holds a bounded number of entries, sweeps expired ones on
//! every write, and evicts the least recently used entry when full. There is
//! no invalidation tied to store changes; a cached network can be stale until
//! it expires or the cache is cleared.
//!
//! Concurrent misses for the same key may each rebuild and each write. Every
//! write stores a complete graph, so whichever lands last is as good as any.

use crate::GraphData;
use litnet_core::{Error, Result};
use litnet_store::EntityId;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

// ============================================================================
// Keys
// ============================================================================

/// Identifies a cached network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The author/editor/translator network. Single global entry.
    ContributorNetwork,
    /// A schools network, keyed by a hash of the school ids.
    SchoolsNetwork { schools_hash: String },
}

impl CacheKey {
    /// Key for a schools network. Order and repeats in `ids` do not matter.
    pub fn schools(ids: impl IntoIterator<Item = EntityId>) -> Self {
        let mut ids: Vec<EntityId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut hasher = blake3::Hasher::new();
        for id in ids {
            hasher.update(&id.to_le_bytes());
        }
        Self::SchoolsNetwork {
            schools_hash: hasher.finalize().to_hex().to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContributorNetwork => f.write_str("contributor-network"),
            Self::SchoolsNetwork { schools_hash } => {
                write!(f, "schools-network:{}", &schools_hash[..schools_hash.len().min(12)])
            }
        }
    }
}

// ============================================================================
// Cache trait
// ============================================================================

/// Storage for built networks.
pub trait GraphCache: Send + Sync {
    /// A previously stored graph that has not expired.
    fn get(&self, key: &CacheKey) -> Option<Arc<GraphData>>;

    /// Store a graph.
    ///
    /// # Errors
    ///
    /// [`Error::CacheStorage`] when the graph cannot be stored. Callers
    /// should keep the graph they built and carry on.
    fn set(&self, key: CacheKey, graph: Arc<GraphData>) -> Result<()>;

    fn remove(&self, key: &CacheKey);

    fn clear(&self);
}

/// A cache that stores nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullGraphCache;

impl GraphCache for NullGraphCache {
    fn get(&self, _key: &CacheKey) -> Option<Arc<GraphData>> {
        None
    }

    fn set(&self, _key: CacheKey, _graph: Arc<GraphData>) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &CacheKey) {}

    fn clear(&self) {}
}

// ============================================================================
// In-memory cache
// ============================================================================

/// Limits for [`MemoryGraphCache`].
#[derive(Clone, Debug)]
pub struct CacheOptions {
    /// Entry lifetime; `None` keeps entries until removed.
    pub ttl: Option<Duration>,
    /// Largest graph accepted, counted as nodes plus edges.
    pub max_graph_elements: Option<usize>,
    /// Most entries held at once; `0` is treated as `1`.
    pub max_entries: usize,
}

/// Default entry capacity of [`MemoryGraphCache`].
pub const DEFAULT_MAX_ENTRIES: usize = 64;

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(300)),
            max_graph_elements: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Hit and miss counters.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    /// Lookups that found nothing or an expired entry.
    pub misses: AtomicU64,
    pub expirations: AtomicU64,
    /// Writes refused by the size limit.
    pub rejections: AtomicU64,
    /// Entries dropped to make room for a new one.
    pub evictions: AtomicU64,
}

impl CacheMetrics {
    fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

struct CacheEntry {
    graph: Arc<GraphData>,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.stored_at.elapsed() >= ttl)
    }
}

/// TTL and capacity bounded in-memory cache.
pub struct MemoryGraphCache {
    entries: RwLock<LruCache<CacheKey, CacheEntry>>,
    options: CacheOptions,
    metrics: CacheMetrics,
}

impl MemoryGraphCache {
    pub fn new(options: CacheOptions) -> Self {
        let capacity = NonZeroUsize::new(options.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            options,
            metrics: CacheMetrics::default(),
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryGraphCache {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

impl GraphCache for MemoryGraphCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<GraphData>> {
        // Lookups update recency, so even reads take the write lock.
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(_) => {
                log::warn!("Graph cache lock poisoned; treating {key} as a miss");
                CacheMetrics::record(&self.metrics.misses);
                return None;
            }
        };

        let found = entries
            .get(key)
            .map(|entry| (entry.is_expired(self.options.ttl), Arc::clone(&entry.graph)));
        match found {
            None => {
                log::debug!("Graph cache miss for {key}");
                CacheMetrics::record(&self.metrics.misses);
                None
            }
            Some((false, graph)) => {
                log::debug!("Graph cache hit for {key}");
                CacheMetrics::record(&self.metrics.hits);
                Some(graph)
            }
            Some((true, _)) => {
                log::debug!("Graph cache entry for {key} expired");
                entries.pop(key);
                CacheMetrics::record(&self.metrics.expirations);
                CacheMetrics::record(&self.metrics.misses);
                None
            }
        }
    }

    fn set(&self, key: CacheKey, graph: Arc<GraphData>) -> Result<()> {
        let size = graph.node_count() + graph.edge_count();
        if let Some(limit) = self.options.max_graph_elements
            && size > limit
        {
            CacheMetrics::record(&self.metrics.rejections);
            return Err(Error::cache_storage(format!(
                "graph for {key} has {size} elements, limit is {limit}"
            )));
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|e| Error::cache_storage(format!("graph cache lock poisoned: {e}")))?;

        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.options.ttl))
            .map(|(k, _)| k.clone())
            .collect();
        for stale in &expired {
            entries.pop(stale);
        }
        if !expired.is_empty() {
            log::debug!("Swept {} expired graph cache entries", expired.len());
        }

        log::debug!("Caching {key} ({size} elements)");
        let displaced = entries.push(
            key,
            CacheEntry {
                graph,
                stored_at: Instant::now(),
            },
        );
        if let Some((evicted, _)) = displaced
            && !entries.contains(&evicted)
        {
            log::debug!("Evicted {evicted} from graph cache");
            CacheMetrics::record(&self.metrics.evictions);
        }
        Ok(())
    }

    fn remove(&self, key: &CacheKey) {
        if let Ok(mut entries) = self.entries.write() {
            entries.pop(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
