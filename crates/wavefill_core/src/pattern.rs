//! Wave pattern synthesis.
//!
//! A pattern is a `(W+1)×(H+1)` buffer holding two superimposed sine curves:
//! a pale back wave and a solid front wave a quarter wavelength ahead. Above
//! the curves the buffer is transparent, below them it is tinted. Sampling
//! repeats horizontally every `W` pixels (one wavelength) and clamps
//! vertically, so the bottom row extends forever.

use std::f64::consts::PI;

use crate::color::{Color, Rgba8};
use crate::config::WaveConfig;
use crate::raster::{PixelCanvas, Pixmap};
use crate::surface::{DrawSurface, Paint};

/// Sine-curve geometry shared by every tint of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveGeometry {
    width: u32,
    height: u32,
    water_level: f32,
    amplitude: f32,
    angular_frequency: f64,
    back: Vec<f32>,
}

impl WaveGeometry {
    /// Computes the curves, or `None` when either side is zero.
    #[must_use]
    pub fn new(width: u32, height: u32, fill_percent: f32, amplitude_ratio: f32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let water_level = height as f32 * (1.0 - fill_percent / 100.0);
        let amplitude = height as f32 * amplitude_ratio;
        let angular_frequency = 2.0 * PI / f64::from(width);

        let back = (0..=width)
            .map(|x| {
                let wave = (f64::from(x) * angular_frequency).sin();
                water_level + amplitude * wave as f32
            })
            .collect();

        Some(Self {
            width,
            height,
            water_level,
            amplitude,
            angular_frequency,
            back,
        })
    }

    /// Geometry for the configuration's current size and fill level.
    #[must_use]
    pub fn from_config(config: &WaveConfig) -> Option<Self> {
        Self::new(
            config.width(),
            config.height(),
            config.fill_percent(),
            config.amplitude_ratio(),
        )
    }

    /// Wavelength in pixels (the canvas width).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row of the fill line.
    #[must_use]
    pub fn water_level(&self) -> f32 {
        self.water_level
    }

    /// Peak deviation from the fill line.
    #[must_use]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// `2π / W`.
    #[must_use]
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Column offset of the front wave: a quarter wavelength.
    #[must_use]
    pub fn front_shift(&self) -> u32 {
        self.width / 4
    }

    /// Top of the back wave at column `x` (`0..=W`).
    ///
    /// # Panics
    ///
    /// Panics if `x > W`.
    #[must_use]
    pub fn back_y(&self, x: u32) -> f32 {
        self.back[x as usize]
    }

    /// Top of the front wave at column `x` (`0..=W`).
    #[must_use]
    pub fn front_y(&self, x: u32) -> f32 {
        let columns = self.width + 1;
        self.back_y((x + self.front_shift()) % columns)
    }
}

/// A tinted, tileable wave texture.
#[derive(Debug, Clone)]
pub struct WavePattern {
    pixmap: Pixmap,
    tile_width: u32,
    tint: Color,
}

impl WavePattern {
    /// Rasterizes `geometry` in `tint`; the back wave uses `tint` with its
    /// alpha scaled by `back_alpha`.
    #[must_use]
    pub fn synthesize(geometry: &WaveGeometry, tint: Color, back_alpha: f32) -> Self {
        let columns = geometry.width + 1;
        let bottom = (geometry.height + 1) as f32;
        let mut canvas = PixelCanvas::new(columns, geometry.height + 1);

        let back = Paint::solid(tint.scale_alpha(back_alpha));
        for x in 0..columns {
            let column = x as f32;
            canvas.draw_line((column, geometry.back_y(x)), (column, bottom), &back);
        }

        let front = Paint::solid(tint);
        for x in 0..columns {
            let column = x as f32;
            canvas.draw_line((column, geometry.front_y(x)), (column, bottom), &front);
        }

        Self {
            pixmap: canvas.into_pixmap(),
            tile_width: geometry.width,
            tint,
        }
    }

    /// Samples the texture: repeat horizontally, clamp vertically.
    #[must_use]
    pub fn sample(&self, u: f32, v: f32) -> Rgba8 {
        let column = (u.floor() as i64).rem_euclid(i64::from(self.tile_width));
        let last_row = i64::from(self.pixmap.height()) - 1;
        let row = (v.floor() as i64).clamp(0, last_row);
        self.pixmap.pixel(column as u32, row as u32)
    }

    /// Horizontal repeat period.
    #[must_use]
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// The tint the pattern was synthesized with.
    #[must_use]
    pub fn tint(&self) -> Color {
        self.tint
    }

    /// Backing pixels.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// The water pattern and, when a label is set, its label-tinted twin.
#[derive(Debug, Clone)]
pub struct WavePatterns {
    geometry: WaveGeometry,
    water: WavePattern,
    label: Option<WavePattern>,
}

impl WavePatterns {
    /// Synthesizes every pattern `config` needs, or `None` without geometry.
    #[must_use]
    pub fn build(config: &WaveConfig) -> Option<Self> {
        let Some(geometry) = WaveGeometry::from_config(config) else {
            tracing::debug!(
                width = config.width(),
                height = config.height(),
                "skipping wave synthesis without geometry"
            );
            return None;
        };

        let water = WavePattern::synthesize(&geometry, config.water_color(), config.back_alpha());
        let label = config
            .label()
            .map(|_| WavePattern::synthesize(&geometry, config.label_color(), config.back_alpha()));

        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            water_level = geometry.water_level,
            label = label.is_some(),
            "synthesized wave patterns"
        );

        Some(Self {
            geometry,
            water,
            label,
        })
    }

    /// Shared curve geometry.
    #[must_use]
    pub fn geometry(&self) -> &WaveGeometry {
        &self.geometry
    }

    /// Water-tinted pattern for the circle.
    #[must_use]
    pub fn water(&self) -> &WavePattern {
        &self.water
    }

    /// Label-tinted pattern for the glyph mask.
    #[must_use]
    pub fn label(&self) -> Option<&WavePattern> {
        self.label.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ViewAttributes, AMPLITUDE_RATIO, BACK_WAVE_ALPHA};

    fn geometry(width: u32, height: u32, percent: f32) -> WaveGeometry {
        WaveGeometry::new(width, height, percent, AMPLITUDE_RATIO).unwrap()
    }

    #[test]
    fn test_zero_geometry_is_skipped() {
        assert!(WaveGeometry::new(0, 100, 50.0, AMPLITUDE_RATIO).is_none());
        assert!(WaveGeometry::new(100, 0, 50.0, AMPLITUDE_RATIO).is_none());
        assert!(WavePatterns::build(&WaveConfig::default()).is_none());
    }

    #[test]
    fn test_water_level_and_amplitude() {
        assert_eq!(geometry(100, 100, 50.0).water_level(), 50.0);
        assert_eq!(geometry(100, 100, 0.0).water_level(), 100.0);
        assert_eq!(geometry(100, 100, 100.0).water_level(), 0.0);
        assert!((geometry(100, 200, 50.0).amplitude() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_back_wave_follows_sine() {
        let g = geometry(100, 100, 50.0);
        assert!((g.back_y(0) - 50.0).abs() < 1e-4);
        assert!((g.back_y(25) - 60.0).abs() < 1e-3);
        assert!((g.back_y(75) - 40.0).abs() < 1e-3);
        assert!((g.back_y(100) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_front_wave_is_back_wave_shifted_a_quarter() {
        for width in [1, 3, 64, 100, 257] {
            let g = geometry(width, 80, 30.0);
            assert_eq!(g.front_shift(), width / 4);
            for x in 0..=width {
                let expected = g.back_y((x + width / 4) % (width + 1));
                assert_eq!(g.front_y(x), expected, "width {width} column {x}");
            }
        }
    }

    #[test]
    fn test_pattern_layers() {
        let g = geometry(100, 100, 50.0);
        let pattern = WavePattern::synthesize(&g, Color::BLUE, BACK_WAVE_ALPHA);
        assert_eq!(pattern.pixmap().width(), 101);
        assert_eq!(pattern.pixmap().height(), 101);

        // Column 0: back crest at 50, front (shifted to column 25) at 60.
        assert_eq!(pattern.sample(0.0, 10.0), Rgba8::TRANSPARENT);
        assert_eq!(pattern.sample(0.0, 55.0).a, 77);
        assert_eq!(pattern.sample(0.0, 55.0).b, 255);
        assert_eq!(pattern.sample(0.0, 80.0), Rgba8 { r: 0, g: 0, b: 255, a: 255 });
    }

    #[test]
    fn test_sampling_repeats_and_clamps() {
        let g = geometry(64, 48, 50.0);
        let pattern = WavePattern::synthesize(&g, Color::WHITE, BACK_WAVE_ALPHA);
        for v in [0.0, 20.0, 26.0, 40.0] {
            assert_eq!(pattern.sample(3.0, v), pattern.sample(3.0 + 64.0, v));
            assert_eq!(pattern.sample(3.0, v), pattern.sample(3.0 - 128.0, v));
        }
        assert_eq!(pattern.sample(10.0, -50.0), pattern.sample(10.0, 0.0));
        assert_eq!(pattern.sample(10.0, 1e6), pattern.sample(10.0, 48.0));
    }

    #[test]
    fn test_label_pattern_follows_label() {
        let mut config = WaveConfig::from_attributes(&ViewAttributes::default());
        config.set_size(40, 40);
        let patterns = WavePatterns::build(&config).unwrap();
        assert_eq!(patterns.water().tint(), Color::BLUE);
        assert_eq!(patterns.label().map(WavePattern::tint), Some(Color::WHITE));

        config.clear_label();
        assert!(WavePatterns::build(&config).unwrap().label().is_none());
    }
}
