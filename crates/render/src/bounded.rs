//! Cost-bounded, internally synchronized LRU caches.
//!
//! Two independent instances back the subsystem: a geometry cache whose
//! entries each cost one unit, and a bitmap cache whose entries cost their
//! byte size. The cache serializes its own bookkeeping behind a mutex, so
//! renderers reach it without holding their per-instance lock for longer
//! than the lookup itself and never block each other through it.

use crate::cache_key::CacheKey;
use lru::LruCache;
use rastext_types::{Bitmap, Size};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cost of one cache entry, in the unit of the owning cache.
pub trait Cost {
    fn cost(&self) -> u64;
}

/// Geometry entries are accounted by item count.
impl Cost for Size {
    fn cost(&self) -> u64 {
        1
    }
}

/// Bitmap entries are accounted by pixel-memory size.
impl Cost for Arc<Bitmap> {
    fn cost(&self) -> u64 {
        self.byte_len() as u64
    }
}

/// Lightweight counters for observability.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
    pub total_cost: u64,
    pub max_cost: u64,
}

struct Inner<V> {
    entries: LruCache<CacheKey, V>,
    total_cost: u64,
}

/// An associative cache that evicts least-recently-used entries once the
/// aggregate cost exceeds `max_cost`.
///
/// Thread-safe through interior locking; shared across renderers as
/// `Arc<BoundedCache<_>>`. Entries may disappear at any time (eviction or a
/// memory-pressure clear), so lookups are always fallible.
pub struct BoundedCache<V> {
    inner: Mutex<Inner<V>>,
    max_cost: u64,
    clear_on_memory_pressure: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Geometry cache: cost unit is one entry.
pub type SizeCache = BoundedCache<Size>;
/// Bitmap cache: cost unit is one byte of pixel data.
pub type BitmapCache = BoundedCache<Arc<Bitmap>>;

impl<V: Cost + Clone> std::fmt::Debug for BoundedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("BoundedCache")
            .field("entries", &stats.entries)
            .field("total_cost", &stats.total_cost)
            .field("max_cost", &stats.max_cost)
            .finish()
    }
}

impl<V: Cost + Clone> BoundedCache<V> {
    /// A cache that keeps its entries across memory-pressure signals.
    pub fn new(max_cost: u64) -> Self {
        Self::with_policy(max_cost, false)
    }

    /// A cache that drops all entries when notified of memory pressure.
    /// The process-wide default caches use this policy.
    pub fn with_pressure_clearing(max_cost: u64) -> Self {
        Self::with_policy(max_cost, true)
    }

    fn with_policy(max_cost: u64, clear_on_memory_pressure: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                total_cost: 0,
            }),
            max_cost,
            clear_on_memory_pressure,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<V>> {
        self.inner.lock().expect("render cache mutex poisoned")
    }

    /// Fetch a value, promoting it to most-recently-used.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let mut inner = self.lock();
        let value = inner.entries.get(key).cloned();
        match value {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        value
    }

    /// Fetch a value without touching recency order or statistics. Backs the
    /// cache-only read path, which must not mutate the cache.
    pub fn peek(&self, key: &CacheKey) -> Option<V> {
        self.lock().entries.peek(key).cloned()
    }

    /// Insert a value, evicting least-recently-used entries until the
    /// aggregate cost fits. A single entry dearer than the whole budget is
    /// not retained.
    pub fn set(&self, key: CacheKey, value: V) {
        let cost = value.cost();
        if cost > self.max_cost {
            log::debug!(
                "cache entry cost {} exceeds budget {}, not retained",
                cost,
                self.max_cost
            );
            return;
        }

        let mut inner = self.lock();
        if let Some(old) = inner.entries.put(key, value) {
            inner.total_cost -= old.cost();
        }
        inner.total_cost += cost;

        while inner.total_cost > self.max_cost {
            match inner.entries.pop_lru() {
                Some((_, evicted)) => {
                    inner.total_cost -= evicted.cost();
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                }
                None => break,
            }
        }
    }

    /// Drop all entries.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.total_cost = 0;
    }

    /// React to a system memory-pressure signal. Clears everything when the
    /// cache was built with the pressure-clearing policy, otherwise a no-op.
    /// Callers must tolerate spontaneous misses either way.
    pub fn handle_memory_pressure(&self) {
        if self.clear_on_memory_pressure {
            let evicted = self.len();
            self.clear();
            log::debug!("dropped {} cache entries under memory pressure", evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_cost(&self) -> u64 {
        self.lock().total_cost
    }

    pub fn max_cost(&self) -> u64 {
        self.max_cost
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: inner.entries.len(),
            total_cost: inner.total_cost,
            max_cost: self.max_cost,
        }
    }
}
