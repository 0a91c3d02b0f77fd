use serde::{Deserialize, Serialize};

use crate::errors::{KingdomError, KingdomResult};

/// A point estimate with its uncertainty interval.
///
/// Invariant: all values finite and `lower <= point <= upper`. Values built
/// directly or deserialized are re-checked with [`IntervalEstimate::validate`]
/// before any engine scores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalEstimate {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IntervalEstimate {
    /// Build a validated estimate.
    pub fn new(point: f64, lower: f64, upper: f64) -> KingdomResult<Self> {
        let estimate = Self {
            point,
            lower,
            upper,
        };
        estimate.validate()?;
        Ok(estimate)
    }

    /// Symmetric interval `point ± half_width`.
    pub fn symmetric(point: f64, half_width: f64) -> KingdomResult<Self> {
        if !half_width.is_finite() || half_width < 0.0 {
            return Err(KingdomError::MalformedEstimate {
                reason: format!("half width must be finite and non-negative, got {half_width}"),
            });
        }
        Self::new(point, point - half_width, point + half_width)
    }

    /// Check the interval invariant.
    pub fn validate(&self) -> KingdomResult<()> {
        if !(self.point.is_finite() && self.lower.is_finite() && self.upper.is_finite()) {
            return Err(KingdomError::MalformedEstimate {
                reason: format!(
                    "non-finite value in ({}, {}, {})",
                    self.point, self.lower, self.upper
                ),
            });
        }
        if self.lower > self.upper {
            return Err(KingdomError::MalformedEstimate {
                reason: format!("lower {} exceeds upper {}", self.lower, self.upper),
            });
        }
        if self.point < self.lower || self.point > self.upper {
            return Err(KingdomError::MalformedEstimate {
                reason: format!(
                    "point {} outside [{}, {}]",
                    self.point, self.lower, self.upper
                ),
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` falls inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// The interval straddles zero, so the direction of the effect is unknown.
    pub fn sign_ambiguous(&self) -> bool {
        self.lower < 0.0 && 0.0 < self.upper
    }
}
