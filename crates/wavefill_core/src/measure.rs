//! Measurement and layout primitives.
//!
//! The indicator is always square: whichever requested side is larger wins,
//! then each axis honours its own constraint.

/// A size constraint offered by the host for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// No constraint; the value is only a hint.
    Unspecified(u32),
    /// The axis must be exactly this size.
    Exactly(u32),
    /// The axis may be at most this size.
    AtMost(u32),
}

impl MeasureSpec {
    /// The size carried by the spec, whatever its mode.
    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            Self::Unspecified(size) | Self::Exactly(size) | Self::AtMost(size) => size,
        }
    }

    /// Resolves this axis given the size the view would like.
    #[must_use]
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(size) => desired.min(size),
            Self::Unspecified(_) => desired,
        }
    }
}

/// Integer pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Either side is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Measures the indicator.
///
/// The larger requested size becomes the common side, then each axis is
/// resolved against its own spec. Two conflicting `Exactly` specs are obeyed
/// as given, so the result is only square when the host allows it.
#[must_use]
pub fn measure_square(width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
    let side = width_spec.size().max(height_spec.size());
    Size::new(width_spec.resolve(side), height_spec.resolve(side))
}

/// A rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
