//! The drawing-surface capability.
//!
//! Anything that can draw lines, circles and single glyphs with a solid or
//! pattern fill can host the indicator: the software [`crate::PixelCanvas`],
//! a recording surface, or a host adapter over a real canvas API.

use crate::color::Color;
use crate::measure::Rect;
use crate::pattern::WavePattern;
use crate::transform::Transform;

/// How a primitive is filled.
#[derive(Debug, Clone, Copy)]
pub enum Fill<'a> {
    /// Single colour.
    Solid(Color),
    /// Tiled wave pattern, mapped to canvas space by `transform`.
    Pattern {
        /// The texture (repeat-x, clamp-y).
        pattern: &'a WavePattern,
        /// Pattern-to-canvas transform.
        transform: Transform,
    },
}

/// Paint for one draw call.
#[derive(Debug, Clone, Copy)]
pub struct Paint<'a> {
    /// Fill source.
    pub fill: Fill<'a>,
}

impl<'a> Paint<'a> {
    /// Solid colour paint.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            fill: Fill::Solid(color),
        }
    }

    /// Pattern paint.
    #[must_use]
    pub const fn pattern(pattern: &'a WavePattern, transform: Transform) -> Self {
        Self {
            fill: Fill::Pattern { pattern, transform },
        }
    }
}

/// Minimal drawing capability the indicator renders through.
///
/// Coordinates are canvas pixels with the origin top-left. Lines are
/// hairlines covering the pixel column (or row) that contains them.
pub trait DrawSurface {
    /// Draws a hairline from `from` to `to`.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), paint: &Paint<'_>);

    /// Fills a circle.
    fn draw_circle(&mut self, center: (f32, f32), radius: f32, paint: &Paint<'_>);

    /// Fills one glyph; `origin` is the left end of its baseline.
    fn draw_text(&mut self, glyph: char, origin: (f32, f32), font_size: f32, paint: &Paint<'_>);

    /// Restricts later draws to `clip` (`None` clears the clip).
    fn set_clip(&mut self, clip: Option<Rect>);
}
