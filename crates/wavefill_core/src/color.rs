//! Colour types.
//!
//! `Color` is the float RGBA value used in configuration and paints.
//! `Rgba8` is the packed pixel stored in pattern buffers and canvases.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::WaveError;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Solid blue, the default water tint.
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Creates a color from a packed 0xAARRGGBB value.
    #[must_use]
    pub const fn argb(argb: u32) -> Self {
        Self::hex(argb.rotate_left(8))
    }

    /// Returns the packed 0xAARRGGBB value.
    #[must_use]
    pub fn to_argb(self) -> u32 {
        let Rgba8 { r, g, b, a } = Rgba8::from(self);
        u32::from_be_bytes([a, r, g, b])
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns a new color with its alpha multiplied by `factor`.
    ///
    /// The result is quantised to an 8-bit alpha, so `BLACK.scale_alpha(0.3)`
    /// has alpha `77/255`.
    #[must_use]
    pub fn scale_alpha(self, factor: f32) -> Self {
        let alpha = (self.a * 255.0 * factor).round().clamp(0.0, 255.0);
        self.with_alpha(alpha / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = WaveError;

    /// Parses `#RRGGBB` or `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WaveError::InvalidColor(s.to_owned());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::argb(0xFF00_0000 | value)),
            8 => Ok(Self::argb(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = WaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

/// Packed 8-bit RGBA pixel, straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent pixel.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Composites `src` over `self` (source-over), `coverage` scaling the
    /// source alpha.
    #[must_use]
    pub fn blend(self, src: Color, coverage: f32) -> Self {
        let sa = (src.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let dst = Color::from(self);
        let out_a = sa + dst.a * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * sa + d * dst.a * (1.0 - sa)) / out_a;
        Self::from(Color::rgba(
            mix(src.r, dst.r),
            mix(src.g, dst.g),
            mix(src.b, dst.b),
            out_a,
        ))
    }
}

impl From<Color> for Rgba8 {
    fn from(c: Color) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: q(c.r),
            g: q(c.g),
            b: q(c.b),
            a: q(c.a),
        }
    }
}

impl From<Rgba8> for Color {
    fn from(p: Rgba8) -> Self {
        Self::rgba(
            f32::from(p.r) / 255.0,
            f32::from(p.g) / 255.0,
            f32::from(p.b) / 255.0,
            f32::from(p.a) / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_and_argb_strings() {
        let blue: Color = "#0000FF".parse().unwrap();
        assert_eq!(blue, Color::BLUE);

        let faded: Color = "#800000FF".parse().unwrap();
        assert!((faded.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((faded.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["0000FF", "#00FF", "#GG0000", "#+12345", ""] {
            assert!(bad.parse::<Color>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_argb_display() {
        assert_eq!(Color::BLUE.to_argb(), 0xFF00_00FF);
        assert_eq!(Color::WHITE.to_string(), "#FFFFFFFF");
    }

    #[test]
    fn test_scale_alpha_quantises() {
        let back = Color::BLACK.scale_alpha(0.3);
        assert_eq!(Rgba8::from(back).a, 77);
    }

    #[test]
    fn test_blend_over_transparent_keeps_source() {
        let px = Rgba8::TRANSPARENT.blend(Color::BLUE.scale_alpha(0.3), 1.0);
        assert_eq!(px, Rgba8 { r: 0, g: 0, b: 255, a: 77 });

        let solid = px.blend(Color::BLUE, 1.0);
        assert_eq!(solid, Rgba8 { r: 0, g: 0, b: 255, a: 255 });
    }
}
