//! Nearest-candidate search shared by `snap` and `align`.

use serde::{Deserialize, Serialize};

/// Outcome of snapping or aligning a value against a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aligned<T> {
    /// The chosen candidate, or the input value on a miss.
    pub value: T,
    /// Distance to the chosen candidate (signed for scalars), `+inf` on a miss.
    pub distance: f64,
    /// Every candidate index exactly tied at the minimal distance. Empty on a
    /// miss.
    pub indices: Vec<usize>,
}

impl<T> Aligned<T> {
    pub(crate) fn miss(value: T) -> Self {
        Self {
            value,
            distance: f64::INFINITY,
            indices: Vec::new(),
        }
    }

    /// Whether a candidate was within the threshold.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Minimal absolute distance found among candidates.
#[derive(Debug)]
pub(crate) struct Nearest {
    /// First index reaching the minimum.
    pub index: usize,
    /// Absolute distance of that candidate.
    pub abs_distance: f64,
    /// All indices tied at the minimum, in candidate order.
    pub tied: Vec<usize>,
}

/// Scan `distances` (absolute) for the minimum. Earlier indices win ties;
/// NaN distances are never selected. Returns `None` if nothing is comparable.
#[allow(clippy::float_cmp)]
pub(crate) fn find(distances: impl IntoIterator<Item = f64>) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;
    for (i, d) in distances.into_iter().enumerate() {
        if d.is_nan() {
            continue;
        }
        if let Some(b) = best.as_mut() {
            if d < b.abs_distance {
                b.index = i;
                b.abs_distance = d;
                b.tied.clear();
                b.tied.push(i);
            } else if d == b.abs_distance {
                b.tied.push(i);
            }
        } else {
            best = Some(Nearest {
                index: i,
                abs_distance: d,
                tied: vec![i],
            });
        }
    }
    best
}

/// Apply the threshold to a search result. A NaN or negative threshold accepts
/// nothing.
pub(crate) fn within(nearest: Option<Nearest>, threshold: f64) -> Option<Nearest> {
    nearest.filter(|n| n.abs_distance <= threshold)
}
