//! StyledTextBuilder trait for resolving abstract text descriptions.
//!
//! The builder turns a style description into a concrete styled run for a
//! given text-scale category. Renderers call it lazily, once per category,
//! and cache the result for their lifetime.

use rastext_types::{StyledTextRun, TextScaleCategory};
use std::fmt::Debug;

/// Produces a concrete styled run for a text-scale category.
///
/// Implementations must be cheap to call repeatedly for the same category
/// (the renderer caches results, but warming from multiple renderers may
/// invoke the builder concurrently), hence `Send + Sync`.
pub trait StyledTextBuilder: Send + Sync + Debug {
    /// Resolve the description into a run scaled for `category`.
    fn render(&self, category: TextScaleCategory) -> StyledTextRun;
}

/// A builder over a fixed base run.
///
/// Scales the base font sizes by the category's factor. Works in any
/// environment and needs no platform text stack, which makes it the default
/// choice for tests and headless tools.
#[derive(Debug, Clone)]
pub struct StaticTextBuilder {
    base: StyledTextRun,
}

impl StaticTextBuilder {
    pub fn new(base: StyledTextRun) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &StyledTextRun {
        &self.base
    }
}

impl StyledTextBuilder for StaticTextBuilder {
    fn render(&self, category: TextScaleCategory) -> StyledTextRun {
        self.base.scaled(category.scale_factor())
    }
}
