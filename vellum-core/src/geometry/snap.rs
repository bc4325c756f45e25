//! Lenient snapping.
//!
//! These run on every pointer move during a drag, against candidate sets that
//! may be empty or transiently stale. Invalid input never errors: a miss
//! returns the input unchanged with an infinite distance.
//!
//! See [`super::align`] for the strict variants.

use super::nearest::{self, Aligned};
use super::{Scalar, Vector2};

/// Snap `value` to the nearest of `candidates` within `threshold`.
///
/// Returns `(snapped, signed_distance)` where `signed_distance = value -
/// snapped`. Ties go to the first candidate in the list. When nothing is
/// within the threshold (including an empty list or a negative threshold)
/// returns `(value, f64::INFINITY)`.
///
/// ```
/// use vellum_core::geometry::snap;
///
/// assert_eq!(snap::scalar(15.0, &[14.0, 16.0, 18.0], 2.0), (14.0, 1.0));
/// assert_eq!(snap::scalar(15.0, &[1.0, 2.0, 3.0], 5.0), (15.0, f64::INFINITY));
/// ```
#[must_use]
pub fn scalar(value: Scalar, candidates: &[Scalar], threshold: f64) -> (Scalar, f64) {
    let found = nearest::find(candidates.iter().map(|c| (value - c).abs()));
    match nearest::within(found, threshold) {
        Some(n) => (candidates[n.index], value - candidates[n.index]),
        None => (value, f64::INFINITY),
    }
}

/// Snap a point to the nearest of `targets` by Euclidean distance.
///
/// Lenient counterpart of [`super::align::vector2`]: an empty target list or
/// a negative threshold is a miss rather than an error.
#[must_use]
pub fn vector2(point: Vector2, targets: &[Vector2], threshold: f64) -> Aligned<Vector2> {
    let found = nearest::find(targets.iter().map(|t| point.distance(t)));
    match nearest::within(found, threshold) {
        Some(n) => Aligned {
            value: targets[n.index],
            distance: n.abs_distance,
            indices: n.tied,
        },
        None => Aligned::miss(point),
    }
}
