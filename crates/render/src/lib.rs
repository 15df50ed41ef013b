//! Render-cache subsystem for immutable attributed text.
//!
//! Orchestrates a text-layout engine behind two shared cost-bounded caches:
//! a geometry cache accounted by item count and a bitmap cache accounted by
//! byte size. Cache keys combine the width constraint, a structural content
//! fingerprint of the resolved styled storage, the background color and the
//! live line limit, so every parameter that affects the output participates
//! in the lookup.

pub mod bounded;
pub mod cache_key;
pub mod config;
pub mod globals;
pub mod renderer;
pub mod storage;

pub use bounded::{BitmapCache, BoundedCache, CacheStats, Cost, SizeCache};
pub use cache_key::CacheKey;
pub use config::{CacheConfig, ConfigError};
pub use globals::{global_bitmap_cache, global_size_cache, notify_memory_pressure};
pub use renderer::{RendererOptions, TextRenderer, WarmTarget};
pub use storage::RenderedStorage;

#[cfg(test)]
mod test_utils;
