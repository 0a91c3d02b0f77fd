//! Whether a screening estimate agrees with high-fidelity ground truth.

use kingdom_core::models::IntervalEstimate;

/// Same direction of effect and overlapping intervals. Symmetric.
pub fn agreement(screening: &IntervalEstimate, high_fidelity: &IntervalEstimate) -> bool {
    signs_agree(screening.point, high_fidelity.point) && intervals_overlap(screening, high_fidelity)
}

/// Zero agrees with any sign.
pub fn signs_agree(a: f64, b: f64) -> bool {
    a == 0.0 || b == 0.0 || (a > 0.0) == (b > 0.0)
}

/// Closed intervals share at least one point.
pub fn intervals_overlap(a: &IntervalEstimate, b: &IntervalEstimate) -> bool {
    !(a.upper < b.lower || b.upper < a.lower)
}
