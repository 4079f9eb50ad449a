//! Software rasterizer.
//!
//! [`PixelCanvas`] is the reference [`DrawSurface`]: pattern synthesis draws
//! its wave columns through it, and hosts without a native canvas (the
//! terminal demo, tests) render frames into it.

use crate::color::{Color, Rgba8};
use crate::glyph::{BlockFont, GlyphMetrics};
use crate::measure::Rect;
use crate::pattern::WavePattern;
use crate::surface::{DrawSurface, Fill, Paint};
use crate::transform::Transform;

/// Owned RGBA8 pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Pixmap {
    /// Creates a transparent buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate is outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels[self.index(x, y)]
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, ready for a texture upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Overwrites every pixel.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(Rgba8::from(color));
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Per-draw colour source with the pattern transform already inverted.
enum Shader<'a> {
    Solid(Color),
    Pattern {
        pattern: &'a WavePattern,
        inverse: Transform,
    },
}

impl<'a> Shader<'a> {
    fn new(paint: &Paint<'a>) -> Option<Self> {
        match paint.fill {
            Fill::Solid(color) => Some(Self::Solid(color)),
            Fill::Pattern { pattern, transform } => transform
                .invert()
                .map(|inverse| Self::Pattern { pattern, inverse }),
        }
    }

    fn color_at(&self, x: f32, y: f32) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::Pattern { pattern, inverse } => {
                let (u, v) = inverse.map_point(x, y);
                Color::from(pattern.sample(u, v))
            }
        }
    }
}

/// A [`DrawSurface`] backed by a [`Pixmap`].
pub struct PixelCanvas {
    pixmap: Pixmap,
    clip: Option<Rect>,
    glyphs: Box<dyn GlyphMetrics>,
}

impl PixelCanvas {
    /// Creates a transparent canvas using [`BlockFont`] glyphs.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_glyphs(width, height, Box::new(BlockFont))
    }

    /// Creates a transparent canvas with host glyph metrics.
    #[must_use]
    pub fn with_glyphs(width: u32, height: u32, glyphs: Box<dyn GlyphMetrics>) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            clip: None,
            glyphs,
        }
    }

    /// Current pixels.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consumes the canvas, returning its pixels.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Resets every pixel to `color` and drops the clip.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
        self.clip = None;
    }

    /// Composites `color` into pixel `(x, y)` if it is on the canvas and
    /// inside the clip.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.pixmap.width) || y >= i64::from(self.pixmap.height) {
            return;
        }
        if let Some(clip) = self.clip {
            if !clip.contains(x as f32 + 0.5, y as f32 + 0.5) {
                return;
            }
        }
        let index = self.pixmap.index(x as u32, y as u32);
        let dst = self.pixmap.pixels[index];
        self.pixmap.pixels[index] = dst.blend(color, coverage);
    }

    /// Pixel rows/columns `[lo, hi)` overlapping the span, clamped to `limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<i64> {
        let start = (lo.floor() as i64).max(0);
        let end = (hi.ceil() as i64).min(i64::from(limit));
        start..end.max(start)
    }

    fn draw_vertical(&mut self, x: f32, y0: f32, y1: f32, shader: &Shader<'_>) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let column = x.floor() as i64;
        for row in Self::span(top, bottom, self.pixmap.height) {
            let overlap = (bottom.min(row as f32 + 1.0) - top.max(row as f32)).clamp(0.0, 1.0);
            let color = shader.color_at(column as f32 + 0.5, row as f32 + 0.5);
            self.blend(column, row, color, overlap);
        }
    }
}

impl DrawSurface for PixelCanvas {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), paint: &Paint<'_>) {
        let Some(shader) = Shader::new(paint) else {
            return;
        };
        if from.0.floor() == to.0.floor() {
            self.draw_vertical(from.0, from.1, to.1, &shader);
            return;
        }

        // DDA: one sample per pixel along the major axis.
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            let (px, py) = (x.floor() as i64, y.floor() as i64);
            let color = shader.color_at(px as f32 + 0.5, py as f32 + 0.5);
            self.blend(px, py, color, 1.0);
        }
    }

    fn draw_circle(&mut self, center: (f32, f32), radius: f32, paint: &Paint<'_>) {
        let Some(shader) = Shader::new(paint) else {
            return;
        };
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = center;
        let rows = Self::span(cy - radius, cy + radius, self.pixmap.height);
        let columns = Self::span(cx - radius, cx + radius, self.pixmap.width);
        for py in rows {
            for px in columns.clone() {
                let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
                let distance = (x - cx).hypot(y - cy);
                let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, shader.color_at(x, y), coverage);
                }
            }
        }
    }

    fn draw_text(&mut self, glyph: char, origin: (f32, f32), font_size: f32, paint: &Paint<'_>) {
        let Some(shader) = Shader::new(paint) else {
            return;
        };
        let bounds = self.glyphs.measure(glyph, font_size);
        let (left, top) = (origin.0, origin.1 - bounds.height);
        let rows = Self::span(top, origin.1, self.pixmap.height);
        let columns = Self::span(left, left + bounds.width, self.pixmap.width);
        for py in rows {
            for px in columns.clone() {
                let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
                let coverage = self.glyphs.coverage(glyph, font_size, x - left, y - top);
                if coverage > 0.0 {
                    self.blend(px, py, shader.color_at(x, y), coverage);
                }
            }
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AMPLITUDE_RATIO, BACK_WAVE_ALPHA};
    use crate::pattern::WaveGeometry;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    #[test]
    fn test_vertical_line_antialiases_top() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.draw_line((1.0, 1.5), (1.0, 5.0), &Paint::solid(RED));
        let px = canvas.pixmap();
        assert_eq!(px.pixel(1, 0).a, 0);
        assert_eq!(px.pixel(1, 1).a, 128);
        assert_eq!(px.pixel(1, 2).a, 255);
        assert_eq!(px.pixel(1, 3).a, 255);
        assert_eq!(px.pixel(0, 3).a, 0);
        assert_eq!(px.pixel(2, 3).a, 0);
    }

    #[test]
    fn test_diagonal_line() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.draw_line((0.5, 0.5), (7.5, 7.5), &Paint::solid(RED));
        for i in 0..8 {
            assert_eq!(canvas.pixmap().pixel(i, i).a, 255);
        }
        assert_eq!(canvas.pixmap().pixel(7, 0).a, 0);
    }

    #[test]
    fn test_circle_covers_centre_not_corners() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.draw_circle((10.0, 10.0), 10.0, &Paint::solid(RED));
        let px = canvas.pixmap();
        assert_eq!(px.pixel(10, 10).a, 255);
        assert_eq!(px.pixel(0, 0).a, 0);
        assert_eq!(px.pixel(19, 19).a, 0);
        assert_eq!(px.pixel(1, 10).a, 255);
        assert!(px.pixel(0, 10).a > 240);
    }

    #[test]
    fn test_clip_limits_drawing() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_clip(Some(Rect::new(0.0, 0.0, 5.0, 10.0)));
        canvas.draw_circle((5.0, 5.0), 5.0, &Paint::solid(RED));
        assert_eq!(canvas.pixmap().pixel(2, 5).a, 255);
        assert_eq!(canvas.pixmap().pixel(7, 5).a, 0);

        canvas.clear(Color::TRANSPARENT);
        canvas.draw_circle((5.0, 5.0), 5.0, &Paint::solid(RED));
        assert_eq!(canvas.pixmap().pixel(7, 5).a, 255);
    }

    #[test]
    fn test_text_is_centred_on_its_box() {
        let mut canvas = PixelCanvas::new(40, 40);
        // 'A' at 40px: 18 wide, 30 tall.
        canvas.draw_text('A', (11.0, 35.0), 40.0, &Paint::solid(RED));
        let px = canvas.pixmap();
        assert_eq!(px.pixel(11, 5).a, 255);
        assert_eq!(px.pixel(28, 34).a, 255);
        assert_eq!(px.pixel(10, 20).a, 0);
        assert_eq!(px.pixel(29, 20).a, 0);
        assert_eq!(px.pixel(20, 4).a, 0);
        assert_eq!(px.pixel(20, 35).a, 0);
    }

    #[test]
    fn test_pattern_fill_uses_inverse_transform() {
        let geometry = WaveGeometry::new(16, 16, 50.0, AMPLITUDE_RATIO).unwrap();
        let pattern = WavePattern::synthesize(&geometry, RED, BACK_WAVE_ALPHA);

        let mut identity = PixelCanvas::new(16, 16);
        identity.draw_circle((8.0, 8.0), 12.0, &Paint::pattern(&pattern, Transform::IDENTITY));
        let mut shifted = PixelCanvas::new(16, 16);
        let mut transform = Transform::IDENTITY;
        transform.post_translate(16.0, 0.0);
        shifted.draw_circle((8.0, 8.0), 12.0, &Paint::pattern(&pattern, transform));

        // A whole-wavelength shift is invisible.
        assert_eq!(identity.pixmap(), shifted.pixmap());
        assert_eq!(identity.pixmap().pixel(4, 1).a, 0);
        assert_eq!(identity.pixmap().pixel(4, 15).a, 255);
    }

    #[test]
    fn test_singular_pattern_transform_draws_nothing() {
        let geometry = WaveGeometry::new(8, 8, 50.0, AMPLITUDE_RATIO).unwrap();
        let pattern = WavePattern::synthesize(&geometry, RED, BACK_WAVE_ALPHA);
        let mut canvas = PixelCanvas::new(8, 8);
        let flat = Transform::scale_about(1.0, 0.0, 0.0, 0.0);
        canvas.draw_circle((4.0, 4.0), 4.0, &Paint::pattern(&pattern, flat));
        assert!(canvas.pixmap().pixels().iter().all(|p| p.a == 0));
    }

    #[test]
    fn test_bytes_view() {
        let mut pixmap = Pixmap::new(2, 1);
        pixmap.fill(RED);
        assert_eq!(pixmap.as_bytes(), &[255, 0, 0, 255, 255, 0, 0, 255]);
    }
}
