//! Geometry kernel: scalar/vector math, affine transforms, rectangles,
//! snapping and alignment, and path synthesis.
//!
//! Nothing in here knows about documents or selections. Every function is a
//! pure function of its arguments.

pub mod align;
pub mod path;
pub mod rect;
pub mod snap;
pub mod transform;
pub mod vector;

mod nearest;

pub use nearest::Aligned;
pub use path::{rounded_rect_path, CornerRadius};
pub use rect::{Alignment, Rectangle};
pub use transform::Transform;
pub use vector::Vector2;

use crate::{CoreError, CoreResult};

/// A single scalar value (position, size, offset).
pub type Scalar = f64;

/// Quantize `value` to the nearest multiple of `step`.
///
/// ```
/// use vellum_core::geometry::quantize;
///
/// assert_eq!(quantize(15.0, 10.0).unwrap(), 20.0);
/// assert_eq!(quantize(7.35, 0.25).unwrap(), 7.25);
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidStep`] if `step` is not a positive number.
pub fn quantize(value: Scalar, step: Scalar) -> CoreResult<Scalar> {
    if step.is_nan() || step <= 0.0 {
        return Err(CoreError::InvalidStep(step));
    }
    // Divide by the inverted step so fractional steps like 0.1 round on an
    // integer-like scale.
    let factor = 1.0 / step;
    Ok((value * factor).round() / factor)
}

/// Smallest absolute difference between `value` and any of `points`.
///
/// Returns `f64::INFINITY` for an empty list.
#[must_use]
pub fn nearest(value: Scalar, points: &[Scalar]) -> Scalar {
    points
        .iter()
        .map(|p| (p - value).abs())
        .fold(f64::INFINITY, f64::min)
}

/// Normalize an angle in degrees to the principal range `[-180, 180)`.
#[must_use]
pub fn principal_angle(angle: Scalar) -> Scalar {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}
