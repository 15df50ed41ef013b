use crate::bounded::{BitmapCache, SizeCache};
use crate::renderer::{RendererOptions, TextRenderer};
use rastext_traits::{
    CaretHit, FixedMetricsEngine, StaticTextBuilder, StyledTextBuilder, TextLayoutEngine,
};
use rastext_types::{Bitmap, Color, LayoutContainer, Point, Size, StyledTextRun, TextAttributes};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps the fixed-metrics engine and counts collaborator invocations, so
/// tests can assert that cache hits skip layout work entirely.
#[derive(Debug)]
pub struct CountingEngine {
    inner: FixedMetricsEngine,
    measures: Arc<AtomicUsize>,
    rasterizes: Arc<AtomicUsize>,
}

impl CountingEngine {
    pub fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let measures = Arc::new(AtomicUsize::new(0));
        let rasterizes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: FixedMetricsEngine::new(),
                measures: measures.clone(),
                rasterizes: rasterizes.clone(),
            },
            measures,
            rasterizes,
        )
    }
}

impl TextLayoutEngine for CountingEngine {
    fn measure(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        width: f32,
        scale: f32,
    ) -> Size {
        self.measures.fetch_add(1, Ordering::SeqCst);
        self.inner.measure(container, run, width, scale)
    }

    fn rasterize(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        size: Size,
        scale: f32,
        background: Option<Color>,
    ) -> Bitmap {
        self.rasterizes.fetch_add(1, Ordering::SeqCst);
        self.inner.rasterize(container, run, size, scale, background)
    }

    fn caret_at(
        &self,
        container: &LayoutContainer,
        run: &StyledTextRun,
        point: Point,
    ) -> Option<CaretHit> {
        self.inner.caret_at(container, run, point)
    }
}

/// An engine whose caret query always reports a fixed hit, for exercising
/// the fractional-distance boundary without depending on layout math.
#[derive(Debug)]
pub struct ScriptedCaretEngine {
    inner: FixedMetricsEngine,
    pub hit: Option<CaretHit>,
}

impl ScriptedCaretEngine {
    pub fn new(hit: Option<CaretHit>) -> Self {
        Self {
            inner: FixedMetricsEngine::new(),
            hit,
        }
    }
}

impl TextLayoutEngine for ScriptedCaretEngine {
    fn measure(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        width: f32,
        scale: f32,
    ) -> Size {
        self.inner.measure(container, run, width, scale)
    }

    fn rasterize(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        size: Size,
        scale: f32,
        background: Option<Color>,
    ) -> Bitmap {
        self.inner.rasterize(container, run, size, scale, background)
    }

    fn caret_at(
        &self,
        _container: &LayoutContainer,
        _run: &StyledTextRun,
        _point: Point,
    ) -> Option<CaretHit> {
        self.hit
    }
}

pub fn hello_builder() -> Arc<dyn StyledTextBuilder> {
    Arc::new(StaticTextBuilder::new(StyledTextRun::plain(
        "Hello",
        TextAttributes::default(),
    )))
}

pub fn builder_for(text: &str) -> Arc<dyn StyledTextBuilder> {
    Arc::new(StaticTextBuilder::new(StyledTextRun::plain(
        text,
        TextAttributes::default(),
    )))
}

/// A cache pair isolated from the process-wide defaults, so tests never
/// interfere through shared global state.
pub fn scoped_caches() -> (Arc<SizeCache>, Arc<BitmapCache>) {
    (
        Arc::new(SizeCache::new(64)),
        Arc::new(BitmapCache::new(4 * 1024 * 1024)),
    )
}

pub fn scoped_options() -> RendererOptions {
    RendererOptions {
        caches: Some(scoped_caches()),
        ..Default::default()
    }
}

/// Renderer over the counting engine with isolated caches; returns the
/// measure and rasterize counters alongside.
pub fn counting_renderer(
    text: &str,
    options: RendererOptions,
) -> (TextRenderer, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let (engine, measures, rasterizes) = CountingEngine::new();
    let renderer = TextRenderer::new(builder_for(text), Box::new(engine), options);
    (renderer, measures, rasterizes)
}
