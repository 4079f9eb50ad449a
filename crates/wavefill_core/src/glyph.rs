//! Glyph metrics.
//!
//! Text shaping belongs to the host. The view only needs the ink bounds of
//! its single label glyph (to centre it) and, for software rasterization,
//! per-pixel coverage. [`BlockFont`] is the fallback used when the host has
//! no font: each glyph is a solid block sized by its display width.

use unicode_width::UnicodeWidthChar;

/// Ink bounds of a glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// Glyph measurement and coverage provided by the host.
pub trait GlyphMetrics {
    /// Ink bounds of `glyph` at `font_size`.
    fn measure(&self, glyph: char, font_size: f32) -> TextBounds;

    /// Coverage in `[0, 1]` of the point `(x, y)`, relative to the top-left
    /// corner of the glyph's ink bounds.
    fn coverage(&self, glyph: char, font_size: f32, x: f32, y: f32) -> f32 {
        let bounds = self.measure(glyph, font_size);
        let inside = x >= 0.0 && y >= 0.0 && x < bounds.width && y < bounds.height;
        if inside {
            1.0
        } else {
            0.0
        }
    }
}

/// Block glyphs: half an em per display column, three quarters of an em tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFont;

impl BlockFont {
    const CELL_WIDTH: f32 = 0.5;
    const INK_WIDTH: f32 = 0.9;
    const CAP_HEIGHT: f32 = 0.75;
}

impl GlyphMetrics for BlockFont {
    fn measure(&self, glyph: char, font_size: f32) -> TextBounds {
        let columns = glyph.width().unwrap_or(0);
        if columns == 0 || glyph.is_whitespace() {
            return TextBounds::default();
        }
        TextBounds {
            width: font_size * Self::CELL_WIDTH * columns as f32 * Self::INK_WIDTH,
            height: font_size * Self::CAP_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_glyph_is_twice_as_wide() {
        let narrow = BlockFont.measure('A', 100.0);
        let wide = BlockFont.measure('贴', 100.0);
        assert!((narrow.width - 45.0).abs() < 1e-4);
        assert!((wide.width - 90.0).abs() < 1e-4);
        assert_eq!(narrow.height, wide.height);
    }

    #[test]
    fn test_whitespace_has_no_ink() {
        assert_eq!(BlockFont.measure(' ', 40.0), TextBounds::default());
        assert_eq!(BlockFont.coverage(' ', 40.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_block_coverage() {
        assert_eq!(BlockFont.coverage('A', 40.0, 1.0, 1.0), 1.0);
        assert_eq!(BlockFont.coverage('A', 40.0, 18.5, 1.0), 0.0);
        assert_eq!(BlockFont.coverage('A', 40.0, 1.0, -0.5), 0.0);
    }
}
