//! The renderer: compute-or-fetch orchestration over the two caches.
//!
//! Each renderer owns one mutex guarding its layout engine, its layout
//! container and its per-category storage map. The lock is renderer-scoped,
//! not cache-scoped: renderers sharing the default caches still measure and
//! rasterize in parallel, because the caches synchronize themselves.

use crate::bounded::{BitmapCache, SizeCache};
use crate::cache_key::CacheKey;
use crate::globals::{global_bitmap_cache, global_size_cache};
use crate::storage::RenderedStorage;
use rastext_traits::{StyledTextBuilder, TextLayoutEngine};
use rastext_types::{
    Bitmap, Color, EdgeInsets, LayoutContainer, Point, Size, TextAttributes, TextScaleCategory,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Which cache a [`TextRenderer::warm`] call primes.
///
/// Warming the bitmap necessarily primes the size cache too, since
/// rasterization happens at the measured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmTarget {
    Size,
    Bitmap,
}

/// Construction parameters for a renderer.
///
/// `caches: None` selects the process-wide default pair; supplying an
/// explicit pair scopes cache lifetime and capacity to a subsystem.
#[derive(Debug, Clone, Default)]
pub struct RendererOptions {
    pub category: TextScaleCategory,
    pub insets: EdgeInsets,
    pub background: Option<Color>,
    pub pixel_scale: Option<f32>,
    pub max_lines: usize,
    pub caches: Option<(Arc<SizeCache>, Arc<BitmapCache>)>,
}

#[derive(Debug)]
struct RendererState {
    engine: Box<dyn TextLayoutEngine>,
    container: LayoutContainer,
    category: TextScaleCategory,
    storage: HashMap<TextScaleCategory, Arc<RenderedStorage>>,
}

/// Thread-safe entry point for measuring and rasterizing one styled text.
///
/// All operations are plain synchronous calls, safe to invoke concurrently
/// from any number of threads; there is no cancellation or timeout, so
/// callers needing asynchrony dispatch onto their own background context.
#[derive(Debug)]
pub struct TextRenderer {
    builder: Arc<dyn StyledTextBuilder>,
    insets: EdgeInsets,
    background: Option<Color>,
    pixel_scale: f32,
    size_cache: Arc<SizeCache>,
    bitmap_cache: Arc<BitmapCache>,
    state: Mutex<RendererState>,
}

impl TextRenderer {
    pub fn new(
        builder: Arc<dyn StyledTextBuilder>,
        engine: Box<dyn TextLayoutEngine>,
        options: RendererOptions,
    ) -> Self {
        let (size_cache, bitmap_cache) = options
            .caches
            .unwrap_or_else(|| (global_size_cache(), global_bitmap_cache()));
        Self {
            builder,
            insets: options.insets,
            background: options.background,
            pixel_scale: options.pixel_scale.unwrap_or(1.0),
            size_cache,
            bitmap_cache,
            state: Mutex::new(RendererState {
                engine,
                container: LayoutContainer::new(options.max_lines),
                category: options.category,
                storage: HashMap::new(),
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RendererState> {
        self.state.lock().expect("renderer mutex poisoned")
    }

    /// Resolve or reuse the storage for the active category. Storages are
    /// kept for the renderer's lifetime; a category switch leaves earlier
    /// ones in place.
    fn storage_for(&self, state: &mut RendererState) -> Arc<RenderedStorage> {
        let category = state.category;
        state
            .storage
            .entry(category)
            .or_insert_with(|| {
                log::debug!("building styled storage for {:?}", category);
                Arc::new(RenderedStorage::build(self.builder.as_ref(), category))
            })
            .clone()
    }

    fn key_for(&self, state: &RendererState, storage: &RenderedStorage, width: f32) -> CacheKey {
        // The line-limit component always reads the live container value, on
        // both the size and the bitmap path.
        CacheKey::new(width, storage, self.background, state.container.max_lines)
    }

    /// The measurement path, called with the state lock already held.
    fn measure_locked(&self, state: &mut RendererState, width: f32) -> Size {
        let storage = self.storage_for(state);
        let key = self.key_for(state, &storage, width);

        if let Some(size) = self.size_cache.get(&key) {
            log::trace!("size cache hit at width {}", width);
            // Rasterization reads the container's current size, so the
            // cached measurement is re-applied even on a hit.
            state.container.size = size;
            return size;
        }

        log::debug!("measuring at width {}", width);
        let measure_width = if width.is_finite() {
            (width - self.insets.horizontal()).max(0.0)
        } else {
            width
        };
        let size = state.engine.measure(
            &mut state.container,
            storage.run(),
            measure_width,
            self.pixel_scale,
        );
        state.container.size = size;
        // Keyed by the un-adjusted width so lookups match the request.
        self.size_cache.set(key, size);
        size
    }

    /// Measured size of the text within `width`, ignoring insets.
    pub fn size(&self, width: f32) -> Size {
        let mut guard = self.lock_state();
        self.measure_locked(&mut guard, width)
    }

    /// Fit-to-content size (unbounded width).
    pub fn natural_size(&self) -> Size {
        self.size(f32::INFINITY)
    }

    /// Measured size expanded by the configured insets on all four edges.
    pub fn view_size(&self, width: f32) -> Size {
        self.insets.expand(self.size(width))
    }

    /// Rasterize at `width`, returning the bitmap and its measured size.
    /// Both tiers are consulted before any layout work happens.
    pub fn render(&self, width: f32) -> (Arc<Bitmap>, Size) {
        let mut guard = self.lock_state();
        let state = &mut *guard;

        let storage = self.storage_for(state);
        let key = self.key_for(state, &storage, width);
        let size = self.measure_locked(state, width);

        if let Some(bitmap) = self.bitmap_cache.get(&key) {
            log::trace!("bitmap cache hit at width {}", width);
            return (bitmap, size);
        }

        log::debug!("rasterizing at width {}", width);
        let bitmap = Arc::new(state.engine.rasterize(
            &mut state.container,
            storage.run(),
            size,
            self.pixel_scale,
            self.background,
        ));
        self.bitmap_cache.set(key, bitmap.clone());
        (bitmap, size)
    }

    /// Whatever is already cached for `width`, without triggering any
    /// measurement or rasterization work and without mutating either cache.
    pub fn cached_render(&self, width: f32) -> (Option<Arc<Bitmap>>, Option<Size>) {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        let storage = self.storage_for(state);
        let key = self.key_for(state, &storage, width);
        (self.bitmap_cache.peek(&key), self.size_cache.peek(&key))
    }

    /// Style attributes and character index at `point`, or `None` when the
    /// point does not resolve to real content (fractional caret distance of
    /// 1.0 or more, or outside the laid-out text entirely).
    pub fn attributes_at(&self, point: Point) -> Option<(TextAttributes, usize)> {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        let storage = self.storage_for(state);
        let hit = state
            .engine
            .caret_at(&state.container, storage.run(), point)?;
        if hit.fraction >= 1.0 {
            return None;
        }
        storage
            .run()
            .attributes_at(hit.index)
            .map(|attrs| (attrs.clone(), hit.index))
    }

    /// Proactively populate a cache for `width`; the result is discarded.
    /// Chainable.
    pub fn warm(&self, target: WarmTarget, width: f32) -> &Self {
        match target {
            WarmTarget::Size => {
                self.size(width);
            }
            WarmTarget::Bitmap => {
                self.render(width);
            }
        }
        self
    }

    /// Unconditionally empty both caches reachable from this renderer.
    ///
    /// For renderers sharing the default caches this is a coarse, global
    /// invalidation: entries of every other renderer using them go too.
    pub fn clear_caches(&self) -> &Self {
        log::debug!("clearing size and bitmap caches");
        self.size_cache.clear();
        self.bitmap_cache.clear();
        self
    }

    /// Switch the active text-scale category. Storage for the new category
    /// is built lazily on the next access; previously cached entries stay
    /// until eviction or an explicit clear.
    pub fn set_category(&self, category: TextScaleCategory) -> &Self {
        self.lock_state().category = category;
        self
    }

    pub fn category(&self) -> TextScaleCategory {
        self.lock_state().category
    }

    /// The last-applied measurement, as held by the layout container.
    pub fn last_size(&self) -> Size {
        self.lock_state().container.size
    }

    pub fn line_limit(&self) -> usize {
        self.lock_state().container.max_lines
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }
}
