//! SVG path synthesis.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Corner radius: one value for all corners, or four independent radii in
/// `[top_left, top_right, bottom_right, bottom_left]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    /// Same radius on every corner.
    Uniform(f64),
    /// `[top_left, top_right, bottom_right, bottom_left]`.
    Independent([f64; 4]),
}

impl CornerRadius {
    /// Expand to `[top_left, top_right, bottom_right, bottom_left]`.
    #[must_use]
    pub fn to_array(self) -> [f64; 4] {
        match self {
            Self::Uniform(r) => [r; 4],
            Self::Independent(radii) => radii,
        }
    }

    /// Whether all four corners share one radius.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_uniform(self) -> bool {
        let [tl, tr, br, bl] = self.to_array();
        tl == tr && tr == br && br == bl
    }
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl From<f64> for CornerRadius {
    fn from(r: f64) -> Self {
        Self::Uniform(r)
    }
}

impl From<[f64; 4]> for CornerRadius {
    fn from(radii: [f64; 4]) -> Self {
        Self::Independent(radii)
    }
}

/// Build the SVG path of a `width × height` rectangle at the origin with
/// rounded corners.
///
/// The path starts at `(top_left, 0)` and visits the corners clockwise in
/// `[top_left, top_right, bottom_right, bottom_left]` order, each as a
/// quadratic curve whose control point is the sharp corner. Radii are clamped
/// to `[0, min(width, height) / 2]`.
///
/// ```
/// use vellum_core::geometry::rounded_rect_path;
///
/// assert_eq!(
///     rounded_rect_path(100.0, 50.0, 10.0.into()),
///     "M10 0 H90 Q100 0 100 10 V40 Q100 50 90 50 H10 Q0 50 0 40 V10 Q0 0 10 0 Z",
/// );
/// ```
#[must_use]
pub fn rounded_rect_path(width: f64, height: f64, radius: CornerRadius) -> String {
    let max = (width.min(height) / 2.0).max(0.0);
    let [tl, tr, br, bl] = radius.to_array().map(|r| r.clamp(0.0, max));
    let (w, h) = (width, height);

    let mut d = String::with_capacity(96);
    let _ = write!(d, "M{tl} 0 H{}", w - tr);
    let _ = write!(d, " Q{w} 0 {w} {tr} V{}", h - br);
    let _ = write!(d, " Q{w} {h} {} {h} H{bl}", w - br);
    let _ = write!(d, " Q0 {h} 0 {} V{tl}", h - bl);
    let _ = write!(d, " Q0 0 {tl} 0 Z");
    d
}
