use criterion::{Criterion, criterion_group, criterion_main};
use rastext::{
    CacheConfig, FixedMetricsEngine, RendererOptions, StaticTextBuilder, StyledTextRun,
    TextAttributes, TextRenderer, WarmTarget,
};
use std::hint::black_box;
use std::sync::Arc;

fn renderer() -> TextRenderer {
    let (sizes, bitmaps) = CacheConfig::default().build().unwrap();
    let builder = Arc::new(StaticTextBuilder::new(StyledTextRun::plain(
        "The quick brown fox jumps over the lazy dog",
        TextAttributes::default(),
    )));
    TextRenderer::new(
        builder,
        Box::new(FixedMetricsEngine::new()),
        RendererOptions {
            caches: Some((sizes, bitmaps)),
            ..Default::default()
        },
    )
}

fn bench_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("size");

    let warm = renderer();
    warm.warm(WarmTarget::Size, 240.0);
    group.bench_function("hit", |b| {
        b.iter(|| black_box(warm.size(black_box(240.0))));
    });

    let cold = renderer();
    let mut width = 0.0f32;
    group.bench_function("miss", |b| {
        b.iter(|| {
            // A fresh width per iteration keeps every lookup a miss.
            width += 1.0;
            black_box(cold.size(black_box(width)))
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let warm = renderer();
    warm.warm(WarmTarget::Bitmap, 240.0);
    group.bench_function("hit", |b| {
        b.iter(|| black_box(warm.render(black_box(240.0))));
    });

    let cold = renderer();
    let mut width = 0.0f32;
    group.bench_function("miss", |b| {
        b.iter(|| {
            width += 1.0;
            black_box(cold.render(black_box(width)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_size, bench_render);
criterion_main!(benches);
