//! Strict alignment.
//!
//! Same nearest-candidate search as [`super::snap`], but an empty candidate
//! list or a negative threshold is a caller bug and is reported as an error.

use super::nearest::{self, Aligned};
use super::{Scalar, Vector2};
use crate::{CoreError, CoreResult};

fn check(threshold: f64, len: usize) -> CoreResult<()> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(CoreError::NegativeThreshold(threshold));
    }
    if len == 0 {
        return Err(CoreError::EmptyTargets);
    }
    Ok(())
}

/// Align `value` to the nearest of `targets` within `threshold`.
///
/// On a hit, `distance` is the signed `value - target` and `indices` lists
/// every target exactly tied at the minimal distance; `value` is the first of
/// them. On a miss returns `value` unchanged, `+inf` and no indices.
///
/// ```
/// use vellum_core::geometry::align;
///
/// let r = align::scalar(22.0, &[10.0, 20.0, 20.0, 40.0], 5.0).unwrap();
/// assert_eq!((r.value, r.distance, r.indices), (20.0, 2.0, vec![1, 2]));
/// assert!(align::scalar(15.0, &[], 5.0).is_err());
/// ```
///
/// # Errors
///
/// Returns [`CoreError::NegativeThreshold`] for a negative threshold and
/// [`CoreError::EmptyTargets`] for an empty target list.
pub fn scalar(value: Scalar, targets: &[Scalar], threshold: f64) -> CoreResult<Aligned<Scalar>> {
    check(threshold, targets.len())?;
    let found = nearest::find(targets.iter().map(|t| (value - t).abs()));
    Ok(match nearest::within(found, threshold) {
        Some(n) => Aligned {
            value: targets[n.index],
            distance: value - targets[n.index],
            indices: n.tied,
        },
        None => Aligned::miss(value),
    })
}

/// Align a point to the nearest of `targets` by Euclidean distance.
///
/// The snapped value is an exact copy of the winning target (not
/// axis-decomposed). `indices` holds every target exactly tied for the
/// minimal distance.
///
/// # Errors
///
/// Returns [`CoreError::NegativeThreshold`] for a negative threshold and
/// [`CoreError::EmptyTargets`] for an empty target list.
pub fn vector2(
    point: Vector2,
    targets: &[Vector2],
    threshold: f64,
) -> CoreResult<Aligned<Vector2>> {
    check(threshold, targets.len())?;
    let found = nearest::find(targets.iter().map(|t| point.distance(t)));
    Ok(match nearest::within(found, threshold) {
        Some(n) => Aligned {
            value: targets[n.index],
            distance: n.abs_distance,
            indices: n.tied,
        },
        None => Aligned::miss(point),
    })
}
