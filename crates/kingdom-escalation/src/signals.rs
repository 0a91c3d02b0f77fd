//! Uncertainty signals read off a screening interval.

use kingdom_core::models::IntervalEstimate;
use serde::{Deserialize, Serialize};

/// What the band table looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSignals {
    /// `upper − lower`.
    pub width: f64,
    /// `lower < 0 < upper`.
    pub sign_ambiguous: bool,
    /// `width / (|point| + ε)`.
    pub uncertainty_ratio: f64,
}

impl ScreeningSignals {
    /// Signals for a validated estimate.
    pub fn from_estimate(estimate: &IntervalEstimate, ratio_epsilon: f64) -> Self {
        let width = estimate.width();
        Self {
            width,
            sign_ambiguous: estimate.sign_ambiguous(),
            uncertainty_ratio: width / (estimate.point.abs() + ratio_epsilon),
        }
    }
}
