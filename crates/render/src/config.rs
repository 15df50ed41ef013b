use crate::bounded::{BitmapCache, SizeCache};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Default geometry-cache capacity, in entries.
pub const DEFAULT_SIZE_CACHE_ITEMS: u64 = 500;
/// Default bitmap-cache capacity, in bytes of pixel data.
pub const DEFAULT_BITMAP_CACHE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("geometry cache capacity must be non-zero")]
    ZeroSizeCapacity,
    #[error("bitmap cache capacity must be non-zero")]
    ZeroBitmapCapacity,
}

/// Capacities and eviction policy for a cache pair.
///
/// The two capacity units differ deliberately: geometry entries are tiny and
/// uniform, so the size cache is bounded by entry count; bitmaps vary wildly
/// with text length and pixel scale, so the bitmap cache is bounded by an
/// aggregate byte budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub size_items: u64,
    pub bitmap_bytes: u64,
    pub clear_on_memory_pressure: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_items: DEFAULT_SIZE_CACHE_ITEMS,
            bitmap_bytes: DEFAULT_BITMAP_CACHE_BYTES,
            clear_on_memory_pressure: true,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_items == 0 {
            return Err(ConfigError::ZeroSizeCapacity);
        }
        if self.bitmap_bytes == 0 {
            return Err(ConfigError::ZeroBitmapCapacity);
        }
        Ok(())
    }

    /// Build a cache pair scoped to a subsystem, as an alternative to the
    /// process-wide default caches.
    pub fn build(&self) -> Result<(Arc<SizeCache>, Arc<BitmapCache>), ConfigError> {
        self.validate()?;
        let (sizes, bitmaps) = if self.clear_on_memory_pressure {
            (
                SizeCache::with_pressure_clearing(self.size_items),
                BitmapCache::with_pressure_clearing(self.bitmap_bytes),
            )
        } else {
            (
                SizeCache::new(self.size_items),
                BitmapCache::new(self.bitmap_bytes),
            )
        };
        Ok((Arc::new(sizes), Arc::new(bitmaps)))
    }
}
