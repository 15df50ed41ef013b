//! Process-wide default caches.
//!
//! Two singletons shared by every renderer that does not supply its own
//! cache pair. Lazily initialized on first use and never torn down before
//! process exit. Both drop all entries on a memory-pressure signal, so any
//! lookup may spontaneously miss.

use crate::bounded::{BitmapCache, SizeCache};
use crate::config::{DEFAULT_BITMAP_CACHE_BYTES, DEFAULT_SIZE_CACHE_ITEMS};
use std::sync::{Arc, OnceLock};

static GLOBAL_SIZE_CACHE: OnceLock<Arc<SizeCache>> = OnceLock::new();
static GLOBAL_BITMAP_CACHE: OnceLock<Arc<BitmapCache>> = OnceLock::new();

/// The shared geometry cache (capacity counted in entries).
pub fn global_size_cache() -> Arc<SizeCache> {
    GLOBAL_SIZE_CACHE
        .get_or_init(|| Arc::new(SizeCache::with_pressure_clearing(DEFAULT_SIZE_CACHE_ITEMS)))
        .clone()
}

/// The shared bitmap cache (capacity counted in bytes).
pub fn global_bitmap_cache() -> Arc<BitmapCache> {
    GLOBAL_BITMAP_CACHE
        .get_or_init(|| {
            Arc::new(BitmapCache::with_pressure_clearing(
                DEFAULT_BITMAP_CACHE_BYTES,
            ))
        })
        .clone()
}

/// Forward a system memory-pressure signal to the default caches.
///
/// Caches that were never touched hold nothing and are left uninitialized.
pub fn notify_memory_pressure() {
    if let Some(cache) = GLOBAL_SIZE_CACHE.get() {
        cache.handle_memory_pressure();
    }
    if let Some(cache) = GLOBAL_BITMAP_CACHE.get() {
        cache.handle_memory_pressure();
    }
}
