//! Vector geometry for posture angle measurement.
//!
//! All angle computation runs through [`three_point_angle`], which measures
//! the angle at a pivot between two rays. Degenerate inputs resolve to the
//! `0.0` sentinel rather than an error, so a single bad landmark can never
//! halt the per-frame path.

use crate::constants::{MIN_VECTOR_MAGNITUDE, VERTICAL_REFERENCE_OFFSET};

/// A 2D coordinate in a consistent unit (typically pixels after
/// denormalization from a detector's [0, 1] output).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reference point straight above this one in image coordinates
    /// (smaller y is higher up).
    #[must_use]
    pub fn vertical_reference(&self) -> Self {
        Self::new(self.x, self.y - VERTICAL_REFERENCE_OFFSET)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Angle at `pivot` between the rays toward `target` and `reference`,
/// in degrees rounded to one decimal place.
///
/// Returns `0.0` when either ray is too short to carry a direction. The zero
/// return doubles as the "could not be computed" sentinel used throughout the
/// pipeline, so callers must not read it as a genuine zero-degree reading.
#[must_use]
pub fn three_point_angle(pivot: Point2D, target: Point2D, reference: Point2D) -> f64 {
    let v1 = (target.x - pivot.x, target.y - pivot.y);
    let v2 = (reference.x - pivot.x, reference.y - pivot.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < MIN_VECTOR_MAGNITUDE || mag2 < MIN_VECTOR_MAGNITUDE {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    let degrees = cos_angle.acos().to_degrees();

    (degrees * 10.0).round() / 10.0
}

/// Median of the positive, finite values in `values`.
///
/// Non-positive entries and NaNs carry the sentinel meaning "no measurement"
/// and are discarded before sorting. An even count resolves to the mean of
/// the two middle elements. Returns `0.0` when nothing usable remains.
#[must_use]
pub fn positive_median(values: &[f64]) -> f64 {
    let mut usable: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if usable.is_empty() {
        return 0.0;
    }
    usable.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = usable.len() / 2;
    if usable.len() % 2 == 0 {
        (usable[mid - 1] + usable[mid]) / 2.0
    } else {
        usable[mid]
    }
}
