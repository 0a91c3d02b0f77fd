use serde::{Deserialize, Serialize};

use super::{defaults, ensure_unit_interval};
use crate::errors::{KingdomError, KingdomResult};

/// Retrospective validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Added to metric denominators so empty categories never divide by zero.
    pub metric_epsilon: f64,
    /// Cases a band needs before its probability is re-estimated.
    pub recalibration_min_samples: usize,
    /// Routing quality gate: minimum precision.
    pub min_precision: f64,
    /// Routing quality gate: minimum recall.
    pub min_recall: f64,
    /// Routing quality gate: maximum escalation rate.
    pub max_escalation_rate: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            metric_epsilon: defaults::DEFAULT_METRIC_EPSILON,
            recalibration_min_samples: defaults::DEFAULT_RECALIBRATION_MIN_SAMPLES,
            min_precision: defaults::DEFAULT_MIN_PRECISION,
            min_recall: defaults::DEFAULT_MIN_RECALL,
            max_escalation_rate: defaults::DEFAULT_MAX_ESCALATION_RATE,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> KingdomResult<()> {
        if !self.metric_epsilon.is_finite() || self.metric_epsilon <= 0.0 {
            return Err(KingdomError::InvalidConfiguration {
                reason: format!("metric_epsilon must be positive, got {}", self.metric_epsilon),
            });
        }
        ensure_unit_interval("min_precision", self.min_precision)?;
        ensure_unit_interval("min_recall", self.min_recall)?;
        ensure_unit_interval("max_escalation_rate", self.max_escalation_rate)?;
        Ok(())
    }
}
