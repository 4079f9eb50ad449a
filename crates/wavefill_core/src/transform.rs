//! 2-D affine transform for pattern fills.
//!
//! Maps pattern space to canvas space:
//!
//! ```text
//! | sx  kx  tx |   | x |
//! | ky  sy  ty | · | y |
//! | 0   0   1  |   | 1 |
//! ```
//!
//! `post_*` operations apply after the current transform (left-multiply),
//! matching the usual canvas-matrix convention.

/// Affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    sx: f32,
    kx: f32,
    tx: f32,
    ky: f32,
    sy: f32,
    ty: f32,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    /// A pure scale about the pivot `(px, py)`.
    #[must_use]
    pub fn scale_about(sx: f32, sy: f32, px: f32, py: f32) -> Self {
        Self {
            sx,
            sy,
            tx: px - sx * px,
            ty: py - sy * py,
            ..Self::IDENTITY
        }
    }

    /// Replaces the transform with a scale about `(px, py)`.
    pub fn set_scale(&mut self, sx: f32, sy: f32, px: f32, py: f32) {
        *self = Self::scale_about(sx, sy, px, py);
    }

    /// Applies a translation after the current transform.
    pub fn post_translate(&mut self, dx: f32, dy: f32) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Maps a point.
    #[must_use]
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }

    /// The inverse transform, or `None` when singular.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            sx: self.sy * inv,
            kx: -self.kx * inv,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv,
            ky: -self.ky * inv,
            sy: self.sx * inv,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv,
        })
    }

    /// Horizontal translation component.
    #[must_use]
    pub fn translate_x(&self) -> f32 {
        self.tx
    }

    /// Vertical scale component.
    #[must_use]
    pub fn scale_y(&self) -> f32 {
        self.sy
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn test_scale_keeps_pivot_fixed() {
        let t = Transform::scale_about(1.0, 0.5, 0.0, 40.0);
        assert!(close(t.map_point(7.0, 40.0), (7.0, 40.0)));
        assert!(close(t.map_point(7.0, 60.0), (7.0, 50.0)));
        assert!(close(t.map_point(7.0, 0.0), (7.0, 20.0)));
    }

    #[test]
    fn test_post_translate_applies_after_scale() {
        let mut t = Transform::IDENTITY;
        t.set_scale(1.0, 0.5, 0.0, 40.0);
        t.post_translate(25.0, 0.0);
        assert!(close(t.map_point(0.0, 60.0), (25.0, 50.0)));

        // set_scale resets whatever was accumulated before
        t.set_scale(1.0, 0.5, 0.0, 40.0);
        assert_eq!(t.translate_x(), 0.0);
    }

    #[test]
    fn test_invert_round_trips() {
        let mut t = Transform::scale_about(1.0, 0.5, 0.0, 30.0);
        t.post_translate(12.5, 0.0);
        let inv = t.invert().unwrap();
        let (x, y) = t.map_point(3.0, 70.0);
        assert!(close(inv.map_point(x, y), (3.0, 70.0)));
        assert!(Transform::scale_about(1.0, 0.0, 0.0, 0.0).invert().is_none());
    }
}
