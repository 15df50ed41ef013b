use rastext::{
    Bitmap, CaretHit, Color, FixedMetricsEngine, LayoutContainer, Point, RendererOptions, Size,
    StaticTextBuilder, StyledTextBuilder, StyledTextRun, TextAttributes, TextLayoutEngine,
    TextRenderer,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine wrapper that counts measure/rasterize calls, so tests can prove a
/// request was served from cache.
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

pub fn builder_for(text: &str) -> Arc<dyn StyledTextBuilder> {
    Arc::new(StaticTextBuilder::new(StyledTextRun::plain(
        text,
        TextAttributes::default(),
    )))
}

/// Renderer over the counting engine; `options.caches == None` means the
/// process-wide default pair.
pub fn counting_renderer(
    text: &str,
    options: RendererOptions,
) -> (TextRenderer, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let (engine, measures, rasterizes) = CountingEngine::new();
    let renderer = TextRenderer::new(builder_for(text), Box::new(engine), options);
    (renderer, measures, rasterizes)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
