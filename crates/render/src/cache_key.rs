use crate::storage::RenderedStorage;
use rastext_types::{Color, StyledTextRun, TextScaleCategory};
use std::hash::{Hash, Hasher};

/// Lookup key for both the size and bitmap caches.
///
/// Equality over all four fields is the correctness invariant of the whole
/// subsystem: any parameter that affects the measured or rasterized output
/// must be part of the key. The width is stored through its bit pattern so
/// the f32 participates exactly in `Hash`/`Eq` (an infinite width is a
/// distinct, stable key meaning fit-to-content).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    width_bits: u32,
    fingerprint: u64,
    background: Option<Color>,
    max_lines: usize,
}

impl CacheKey {
    /// Pure construction from the request parameters. Equal inputs always
    /// produce equal keys, across renderers and across storage rebuilds,
    /// because the fingerprint is structural rather than identity-based.
    pub fn new(
        width: f32,
        storage: &RenderedStorage,
        background: Option<Color>,
        max_lines: usize,
    ) -> Self {
        Self {
            width_bits: width.to_bits(),
            fingerprint: storage.fingerprint(),
            background,
            max_lines,
        }
    }

    pub fn width(&self) -> f32 {
        f32::from_bits(self.width_bits)
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}

/// Structural content hash of a resolved run for one category.
///
/// Hashes text, spans and the category itself, so two renderers with
/// textually identical styled text share cache entries.
pub(crate) fn content_fingerprint(run: &StyledTextRun, category: TextScaleCategory) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    run.hash(&mut hasher);
    category.hash(&mut hasher);
    hasher.finish()
}
