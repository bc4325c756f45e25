//! 2×3 affine transforms.
//!
//! ```text
//! [[a, b, tx],
//!  [c, d, ty]]
//! ```
//!
//! Rows are stored row-major. SVG and canvas APIs take the same matrix as six
//! column-major parameters `(a, c, b, d, tx, ty)`; see
//! [`Transform::to_svg_matrix`].

use serde::{Deserialize, Serialize};

use super::Vector2;

/// A 2D affine transform `[[a, b, tx], [c, d, ty]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(pub [[f64; 3]; 2]);

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    /// Create a transform from its six components in row-major order.
    #[must_use]
    pub const fn new(a: f64, b: f64, tx: f64, c: f64, d: f64, ty: f64) -> Self {
        Self([[a, b, tx], [c, d, ty]])
    }

    /// Pure translation.
    #[must_use]
    pub const fn from_translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    /// Pure (non-uniform) scale.
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Counterclockwise rotation by `degrees`.
    #[must_use]
    pub fn from_rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0)
    }

    /// Matrix product `self * other` (apply `other` first).
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let [[a0, b0, tx0], [c0, d0, ty0]] = self.0;
        let [[a1, b1, tx1], [c1, d1, ty1]] = other.0;
        Self([
            [
                a0 * a1 + b0 * c1,
                a0 * b1 + b0 * d1,
                a0 * tx1 + b0 * ty1 + tx0,
            ],
            [
                c0 * a1 + d0 * c1,
                c0 * b1 + d0 * d1,
                c0 * tx1 + d0 * ty1 + ty0,
            ],
        ])
    }

    /// Scale this transform around an absolute `origin`.
    #[must_use]
    pub fn scale_around(&self, scale: Vector2, origin: Vector2) -> Self {
        let to_origin = Self::from_translation(-origin.x, -origin.y);
        let back = Self::from_translation(origin.x, origin.y);
        back.multiply(&Self::from_scale(scale.x, scale.y).multiply(&to_origin))
            .multiply(self)
    }

    /// Add `delta` to the translation components.
    #[must_use]
    pub fn translate(&self, delta: Vector2) -> Self {
        let mut m = self.0;
        m[0][2] += delta.x;
        m[1][2] += delta.y;
        Self(m)
    }

    /// Scale factors `(sx, sy)`: the magnitude of each row basis vector.
    ///
    /// Used to keep on-canvas overlays visually constant under zoom.
    #[must_use]
    pub fn get_scale(&self) -> Vector2 {
        let [[a, b, _], [c, d, _]] = self.0;
        Vector2::new(a.hypot(b), c.hypot(d))
    }

    /// Translation components `(tx, ty)`.
    #[must_use]
    pub fn get_translate(&self) -> Vector2 {
        Vector2::new(self.0[0][2], self.0[1][2])
    }

    /// Rotation angle in degrees, `atan2(c, a)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.0[1][0].atan2(self.0[0][0]).to_degrees()
    }

    /// Apply the transform to a point.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn apply(&self, p: Vector2) -> Vector2 {
        let [[a, b, tx], [c, d, ty]] = self.0;
        Vector2::new(a * p.x + b * p.y + tx, c * p.x + d * p.y + ty)
    }

    /// Column-major parameters `(a, c, b, d, tx, ty)` as taken by SVG
    /// `matrix(...)` and `CanvasRenderingContext2D.setTransform`.
    #[must_use]
    pub fn to_svg_matrix(&self) -> [f64; 6] {
        let [[a, b, tx], [c, d, ty]] = self.0;
        [a, c, b, d, tx, ty]
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

    #[test]
    fn test_identity() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        let p = Vector2::new(3.0, -2.0);
        assert_eq!(Transform::IDENTITY.apply(p), p);
        assert_eq!(Transform::IDENTITY.get_scale(), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_get_scale() {
        let t = Transform::new(2.0, 0.0, 10.0, 0.0, 3.0, 20.0);
        assert_eq!(t.get_scale(), Vector2::new(2.0, 3.0));
        assert_eq!(t.get_translate(), Vector2::new(10.0, 20.0));

        // rotation does not change the scale
        let r = Transform::from_rotation(30.0).multiply(&Transform::from_scale(4.0, 4.0));
        let s = r.get_scale();
        assert!((s.x - 4.0).abs() < 1e-9);
        assert!((s.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_around() {
        let t = Transform::from_translation(10.0, 20.0);
        let scaled = t.scale_around(Vector2::new(2.0, 2.0), Vector2::new(50.0, 50.0));
        assert_eq!(scaled, Transform::new(2.0, 0.0, -30.0, 0.0, 2.0, -10.0));
    }

    #[test]
    fn test_angle() {
        assert!((Transform::from_rotation(90.0).angle() - 90.0).abs() < 1e-9);
        assert_eq!(Transform::IDENTITY.angle(), 0.0);
    }

    #[test]
    fn test_to_svg_matrix_reorders_axes() {
        let t = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(t.to_svg_matrix(), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
