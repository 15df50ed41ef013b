//! rastext: cached measurement and rasterization of immutable attributed text.
//!
//! A [`TextRenderer`] wraps a text-layout engine and answers `size`, `render`
//! and hit-testing queries for one styled text, caching geometry and bitmaps
//! in two shared cost-bounded LRU caches. Renderers default to the
//! process-wide cache pair and may instead be scoped to their own via
//! [`CacheConfig`].
//!
//! ```
//! use rastext::{
//!     FixedMetricsEngine, RendererOptions, StaticTextBuilder, StyledTextRun, TextAttributes,
//!     TextRenderer,
//! };
//! use std::sync::Arc;
//!
//! let builder = Arc::new(StaticTextBuilder::new(StyledTextRun::plain(
//!     "Hello",
//!     TextAttributes::default(),
//! )));
//! let renderer = TextRenderer::new(
//!     builder,
//!     Box::new(FixedMetricsEngine::new()),
//!     RendererOptions::default(),
//! );
//!
//! let size = renderer.size(100.0);
//! let (bitmap, _) = renderer.render(100.0);
//! assert!(size.height > 0.0);
//! assert!(bitmap.byte_len() > 0);
//! ```

// Foundation types
pub use rastext_types::{
    Bitmap, Color, EdgeInsets, LayoutContainer, Point, Size, StyledSpan, StyledTextRun,
    TextAttributes, TextScaleCategory,
};

// Collaborator contracts and reference implementations
pub use rastext_traits::{
    CaretHit, FixedMetricsEngine, StaticTextBuilder, StyledTextBuilder, TextLayoutEngine,
};

// Render-cache subsystem
pub use rastext_render::{
    BitmapCache, BoundedCache, CacheConfig, CacheKey, CacheStats, ConfigError, Cost,
    RenderedStorage, RendererOptions, SizeCache, TextRenderer, WarmTarget, global_bitmap_cache,
    global_size_cache, notify_memory_pressure,
};
