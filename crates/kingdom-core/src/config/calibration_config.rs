use serde::{Deserialize, Serialize};

use super::{defaults, ensure_unit_interval};
use crate::errors::{KingdomError, KingdomResult};

/// Conformal calibration configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Confidence level used when a caller does not pass one explicitly.
    pub confidence_level: f64,
    /// Maximum |empirical − target| coverage gap accepted by the diagnostic.
    pub coverage_tolerance: f64,
    /// Declared confidence levels reported by the coverage sweep.
    pub sweep_levels: Vec<f64>,
    /// Ridge term added to the normal equations of the linear regressor.
    pub ridge_lambda: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            confidence_level: defaults::DEFAULT_CONFIDENCE_LEVEL,
            coverage_tolerance: defaults::DEFAULT_COVERAGE_TOLERANCE,
            sweep_levels: defaults::DEFAULT_SWEEP_LEVELS.to_vec(),
            ridge_lambda: defaults::DEFAULT_RIDGE_LAMBDA,
        }
    }
}

impl CalibrationConfig {
    pub fn validate(&self) -> KingdomResult<()> {
        validate_confidence_level(self.confidence_level)?;
        for &level in &self.sweep_levels {
            validate_confidence_level(level)?;
        }
        ensure_unit_interval("coverage_tolerance", self.coverage_tolerance)?;
        if !self.ridge_lambda.is_finite() || self.ridge_lambda < 0.0 {
            return Err(KingdomError::InvalidConfiguration {
                reason: format!("ridge_lambda must be non-negative, got {}", self.ridge_lambda),
            });
        }
        Ok(())
    }
}

/// A confidence level must lie strictly inside `(0, 1)`.
pub fn validate_confidence_level(level: f64) -> KingdomResult<()> {
    if !(level > 0.0 && level < 1.0) {
        return Err(KingdomError::InvalidConfiguration {
            reason: format!("confidence level must lie in (0, 1), got {level}"),
        });
    }
    Ok(())
}
