//! TextLayoutEngine trait for abstracting text measurement and rasterization.
//!
//! The engine is the system's opaque text-layout collaborator: it performs
//! line breaking against a layout container and produces measured sizes and
//! rasterized bitmaps. Each engine instance is bound to exactly one renderer,
//! which serializes all access through its own lock; engines are therefore
//! `Send` but not required to be `Sync`.

use rastext_types::{Bitmap, Color, LayoutContainer, Point, Size, StyledTextRun};
use std::fmt::Debug;

/// Result of a caret query: the character (byte) index nearest the point and
/// the fractional distance to the closest insertion boundary.
///
/// A fraction of `1.0` or more means the point lies past the last glyph of a
/// line (trailing whitespace, or beyond the line end) and does not resolve to
/// real content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretHit {
    pub index: usize,
    pub fraction: f32,
}

/// The text-layout collaborator contract.
///
/// All operations are infallible: inputs are assumed well-formed (finite or
/// infinite widths, valid runs). Absence is the only failure mode and only
/// [`TextLayoutEngine::caret_at`] can report it.
pub trait TextLayoutEngine: Send + Debug {
    /// Measure `run` within `width` (infinite means fit-to-content) at the
    /// given pixel scale, laying out at most `container.max_lines` lines.
    fn measure(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        width: f32,
        scale: f32,
    ) -> Size;

    /// Rasterize `run` at the already-measured `size`. When `background` is
    /// set, the bitmap is pre-filled with it so text compositing does not
    /// show transparency artifacts.
    fn rasterize(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        size: Size,
        scale: f32,
        background: Option<Color>,
    ) -> Bitmap;

    /// The caret nearest `point` in the container's coordinate space, or
    /// `None` when the point falls entirely outside the laid-out text.
    fn caret_at(
        &self,
        container: &LayoutContainer,
        run: &StyledTextRun,
        point: Point,
    ) -> Option<CaretHit>;
}

const FALLBACK_FONT_SIZE: f32 = 14.0;
// Fixed-metrics geometry: advance and line height as fractions of font size.
const ADVANCE_RATIO: f32 = 0.5;
const LINE_HEIGHT_RATIO: f32 = 1.2;
const BASELINE_RATIO: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    width: f32,
    height: f32,
}

/// A deterministic layout engine with fixed per-character metrics.
///
/// Every character advances by half its font size and lines are broken
/// greedily at the width constraint. Not a shaping engine: no kerning, no
/// font fallback, no bidi. Its value is that measurements and rasterizations
/// are exactly reproducible in any environment, which is what the cache
/// tests and benches need.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetricsEngine;

impl FixedMetricsEngine {
    pub fn new() -> Self {
        Self
    }

    fn font_size_at(run: &StyledTextRun, index: usize) -> f32 {
        run.attributes_at(index)
            .map(|attrs| attrs.size)
            .unwrap_or(FALLBACK_FONT_SIZE)
    }

    /// Greedy line breaking at fixed advances. `max_lines == 0` is unlimited;
    /// otherwise layout stops once the limit is reached.
    fn layout_lines(run: &StyledTextRun, width: f32, max_lines: usize) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0f32;
        let mut line_height = 0.0f32;

        for (idx, ch) in run.text.char_indices() {
            if max_lines > 0 && lines.len() == max_lines {
                return lines;
            }

            let font_size = Self::font_size_at(run, idx);
            let advance = font_size * ADVANCE_RATIO;
            let height = font_size * LINE_HEIGHT_RATIO;

            if ch == '\n' {
                lines.push(Line {
                    start: line_start,
                    end: idx,
                    width: line_width,
                    height: line_height.max(height),
                });
                line_start = idx + ch.len_utf8();
                line_width = 0.0;
                line_height = 0.0;
                continue;
            }

            if width.is_finite() && line_width + advance > width && line_width > 0.0 {
                lines.push(Line {
                    start: line_start,
                    end: idx,
                    width: line_width,
                    height: line_height,
                });
                line_start = idx;
                line_width = 0.0;
                line_height = 0.0;
            }

            line_width += advance;
            line_height = line_height.max(height);
        }

        if line_width > 0.0 && (max_lines == 0 || lines.len() < max_lines) {
            lines.push(Line {
                start: line_start,
                end: run.text.len(),
                width: line_width,
                height: line_height,
            });
        }
        lines
    }

    /// Snap a logical length up to the pixel grid at `scale`.
    fn snap(value: f32, scale: f32) -> f32 {
        if scale > 0.0 {
            (value * scale).ceil() / scale
        } else {
            value
        }
    }
}

impl TextLayoutEngine for FixedMetricsEngine {
    fn measure(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        width: f32,
        scale: f32,
    ) -> Size {
        let lines = Self::layout_lines(run, width, container.max_lines);
        let max_width = lines.iter().fold(0.0f32, |acc, line| acc.max(line.width));
        let total_height: f32 = lines.iter().map(|line| line.height).sum();
        let size = Size::new(Self::snap(max_width, scale), Self::snap(total_height, scale));
        container.size = size;
        size
    }

    fn rasterize(
        &mut self,
        container: &mut LayoutContainer,
        run: &StyledTextRun,
        size: Size,
        scale: f32,
        background: Option<Color>,
    ) -> Bitmap {
        let px_width = (size.width * scale).ceil().max(0.0) as u32;
        let px_height = (size.height * scale).ceil().max(0.0) as u32;
        let mut pixels = vec![0u8; px_width as usize * px_height as usize * 4];

        if let Some(bg) = background {
            for pixel in pixels.chunks_exact_mut(4) {
                pixel.copy_from_slice(&[bg.r, bg.g, bg.b, bg.alpha_u8()]);
            }
        }

        // Stamp one baseline row per line in the line's leading color, so the
        // output visibly depends on the text content.
        let lines = Self::layout_lines(run, size.width, container.max_lines);
        let mut top = 0.0f32;
        for line in &lines {
            let color = run
                .attributes_at(line.start)
                .map(|attrs| attrs.color)
                .unwrap_or_default();
            let y = ((top + line.height * BASELINE_RATIO) * scale) as u32;
            let row_width = ((line.width * scale) as u32).min(px_width);
            if y < px_height {
                let row_offset = y as usize * px_width as usize * 4;
                for x in 0..row_width as usize {
                    let offset = row_offset + x * 4;
                    pixels[offset..offset + 4].copy_from_slice(&[
                        color.r,
                        color.g,
                        color.b,
                        color.alpha_u8(),
                    ]);
                }
            }
            top += line.height;
        }

        Bitmap::new(px_width, px_height, scale, pixels)
    }

    fn caret_at(
        &self,
        container: &LayoutContainer,
        run: &StyledTextRun,
        point: Point,
    ) -> Option<CaretHit> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let wrap_width = if container.size.width > 0.0 {
            container.size.width
        } else {
            f32::INFINITY
        };
        let lines = Self::layout_lines(run, wrap_width, container.max_lines);

        let mut top = 0.0f32;
        for line in &lines {
            let bottom = top + line.height;
            if point.y >= top && point.y < bottom {
                let mut x = 0.0f32;
                let slice = &run.text[line.start..line.end];
                for (offset, _) in slice.char_indices() {
                    let index = line.start + offset;
                    let advance = Self::font_size_at(run, index) * ADVANCE_RATIO;
                    if point.x < x + advance {
                        return Some(CaretHit {
                            index,
                            fraction: (point.x - x) / advance,
                        });
                    }
                    x += advance;
                }
                // Past the end of the line: report the last character with a
                // saturated fraction so callers treat it as trailing space.
                let last = slice
                    .char_indices()
                    .next_back()
                    .map(|(offset, _)| line.start + offset)
                    .unwrap_or(line.start);
                return Some(CaretHit {
                    index: last,
                    fraction: 1.0,
                });
            }
            top = bottom;
        }
        None
    }
}
