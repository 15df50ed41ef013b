use crate::cache_key::content_fingerprint;
use rastext_traits::StyledTextBuilder;
use rastext_types::{StyledTextRun, TextScaleCategory};

/// The concrete, scale-resolved representation of a styled run for one
/// text-scale category.
///
/// Built lazily on first access for a category and kept for the lifetime of
/// the owning renderer, never evicted early. The binding to the renderer's
/// layout engine is one-way and structural: storages live only inside the
/// renderer's private category map and are only ever borrowed under its
/// lock, so one can never reach a second engine.
#[derive(Debug, Clone)]
pub struct RenderedStorage {
    run: StyledTextRun,
    category: TextScaleCategory,
    fingerprint: u64,
}

impl RenderedStorage {
    /// Resolve the builder's description for `category` and fingerprint the
    /// result once.
    pub(crate) fn build(builder: &dyn StyledTextBuilder, category: TextScaleCategory) -> Self {
        let run = builder.render(category);
        let fingerprint = content_fingerprint(&run, category);
        Self {
            run,
            category,
            fingerprint,
        }
    }

    pub fn run(&self) -> &StyledTextRun {
        &self.run
    }

    pub fn category(&self) -> TextScaleCategory {
        self.category
    }

    /// Structural content hash of the resolved run; the content component of
    /// every cache key built from this storage.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
