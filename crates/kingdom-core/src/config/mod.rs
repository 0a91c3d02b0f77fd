pub mod cache_config;
pub mod calibration_config;
pub mod defaults;
pub mod escalation_config;
pub mod observability_config;
pub mod validation_config;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use calibration_config::CalibrationConfig;
pub use escalation_config::{BandCondition, EscalationConfig, ProbabilityBand, TriggerThresholds};
pub use observability_config::ObservabilityConfig;
pub use validation_config::ValidationConfig;

use crate::constants::{SCORE_MAX, SCORE_MIN};
use crate::errors::{KingdomError, KingdomResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct KingdomConfig {
    pub escalation: EscalationConfig,
    pub calibration: CalibrationConfig,
    pub validation: ValidationConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl KingdomConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    ///
    /// The parsed config is validated before it is returned.
    pub fn from_toml(toml_str: &str) -> KingdomResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| KingdomError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> KingdomResult<()> {
        self.escalation.validate()?;
        self.calibration.validate()?;
        self.validation.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

/// Fail with `InvalidConfiguration` unless `value` lies in `[0, 1]`.
pub(crate) fn ensure_unit_interval(name: &str, value: f64) -> KingdomResult<()> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(KingdomError::InvalidConfiguration {
            reason: format!("{name} must lie in [0, 1], got {value}"),
        });
    }
    Ok(())
}

/// Fail with `InvalidConfiguration` unless `value` is finite and non-negative.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> KingdomResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(KingdomError::InvalidConfiguration {
            reason: format!("{name} must be a finite non-negative number, got {value}"),
        });
    }
    Ok(())
}
