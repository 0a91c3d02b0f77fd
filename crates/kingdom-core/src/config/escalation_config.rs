//! Configuration for the escalation decision engine.
//!
//! The probability bands are a calibration artifact: they are recomputed
//! from retrospective validation and handed back to the engine as data.
//!
//! # Examples
//!
//! ```
//! use kingdom_core::config::EscalationConfig;
//!
//! let config = EscalationConfig::default();
//! assert_eq!(config.bands.len(), 4);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::{defaults, ensure_non_negative, ensure_unit_interval};
use crate::errors::{KingdomError, KingdomResult};

/// Predicate selecting a probability band from the screening signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandCondition {
    /// The screening interval straddles zero.
    SignAmbiguous,
    /// The uncertainty ratio (width / |point|) exceeds `ratio`.
    RatioAbove { ratio: f64 },
    /// Matches every estimate. Must terminate the band list.
    Always,
}

/// One `(condition, probability)` step of the `p_wrong_screen` lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBand {
    /// Stable band name, reported in decisions and recalibration output.
    pub name: String,
    pub condition: BandCondition,
    /// Probability that the screening answer is materially wrong.
    pub probability: f64,
}

impl ProbabilityBand {
    pub fn new(name: impl Into<String>, condition: BandCondition, probability: f64) -> Self {
        Self {
            name: name.into(),
            condition,
            probability,
        }
    }
}

/// Thresholds of the three governance override triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerThresholds {
    /// Stakes trigger: severity above this...
    pub stakes_severity: f64,
    /// ...and model uncertainty above this.
    pub stakes_uncertainty: f64,
    /// Boundary trigger: decision sensitivity above this.
    pub boundary_sensitivity: f64,
    /// Novelty trigger: OOD risk above this.
    pub novelty_ood: f64,
}

impl Default for TriggerThresholds {
    fn default() -> Self {
        Self {
            stakes_severity: defaults::DEFAULT_STAKES_SEVERITY_THRESHOLD,
            stakes_uncertainty: defaults::DEFAULT_STAKES_UNCERTAINTY_THRESHOLD,
            boundary_sensitivity: defaults::DEFAULT_BOUNDARY_SENSITIVITY_THRESHOLD,
            novelty_ood: defaults::DEFAULT_NOVELTY_OOD_THRESHOLD,
        }
    }
}

impl TriggerThresholds {
    pub fn validate(&self) -> KingdomResult<()> {
        ensure_unit_interval("triggers.stakes_severity", self.stakes_severity)?;
        ensure_unit_interval("triggers.stakes_uncertainty", self.stakes_uncertainty)?;
        ensure_unit_interval("triggers.boundary_sensitivity", self.boundary_sensitivity)?;
        ensure_unit_interval("triggers.novelty_ood", self.novelty_ood)?;
        Ok(())
    }
}

/// Escalation engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Multiplier applied to `p_wrong_screen` when the high-fidelity tier runs.
    pub uncertainty_reduction_factor: f64,
    /// Guards the uncertainty ratio against a zero point estimate.
    pub ratio_epsilon: f64,
    /// Ordered bands, evaluated in priority order; first match wins.
    pub bands: Vec<ProbabilityBand>,
    pub triggers: TriggerThresholds,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            uncertainty_reduction_factor: defaults::DEFAULT_UNCERTAINTY_REDUCTION_FACTOR,
            ratio_epsilon: defaults::DEFAULT_RATIO_EPSILON,
            bands: default_bands(),
            triggers: TriggerThresholds::default(),
        }
    }
}

/// The four-band table: ambiguous sign, wide ratio, moderate ratio, tight.
pub fn default_bands() -> Vec<ProbabilityBand> {
    vec![
        ProbabilityBand::new(
            "sign_ambiguous",
            BandCondition::SignAmbiguous,
            defaults::DEFAULT_SIGN_AMBIGUOUS_PROBABILITY,
        ),
        ProbabilityBand::new(
            "wide_ratio",
            BandCondition::RatioAbove {
                ratio: defaults::DEFAULT_WIDE_RATIO,
            },
            defaults::DEFAULT_WIDE_PROBABILITY,
        ),
        ProbabilityBand::new(
            "moderate_ratio",
            BandCondition::RatioAbove {
                ratio: defaults::DEFAULT_MODERATE_RATIO,
            },
            defaults::DEFAULT_MODERATE_PROBABILITY,
        ),
        ProbabilityBand::new(
            "tight_ratio",
            BandCondition::Always,
            defaults::DEFAULT_TIGHT_PROBABILITY,
        ),
    ]
}

impl EscalationConfig {
    /// Validate the configuration.
    ///
    /// The band table must be non-empty, end with an `Always` band, carry
    /// probabilities in `[0, 1]` and be non-increasing in priority order.
    pub fn validate(&self) -> KingdomResult<()> {
        ensure_unit_interval(
            "uncertainty_reduction_factor",
            self.uncertainty_reduction_factor,
        )?;
        if !self.ratio_epsilon.is_finite() || self.ratio_epsilon <= 0.0 {
            return Err(KingdomError::InvalidConfiguration {
                reason: format!("ratio_epsilon must be positive, got {}", self.ratio_epsilon),
            });
        }
        self.triggers.validate()?;

        let last = self.bands.last().ok_or_else(|| KingdomError::InvalidConfiguration {
            reason: "probability band table is empty".to_string(),
        })?;
        if last.condition != BandCondition::Always {
            return Err(KingdomError::InvalidConfiguration {
                reason: format!("final band '{}' must use the `always` condition", last.name),
            });
        }

        let mut previous: Option<&ProbabilityBand> = None;
        for band in &self.bands {
            ensure_unit_interval(&format!("bands.{}.probability", band.name), band.probability)?;
            if let BandCondition::RatioAbove { ratio } = band.condition {
                ensure_non_negative(&format!("bands.{}.ratio", band.name), ratio)?;
            }
            if let Some(prev) = previous {
                if band.probability > prev.probability {
                    return Err(KingdomError::InvalidConfiguration {
                        reason: format!(
                            "band '{}' ({}) exceeds higher-priority band '{}' ({})",
                            band.name, band.probability, prev.name, prev.probability
                        ),
                    });
                }
            }
            previous = Some(band);
        }
        Ok(())
    }

    /// Replace the band table, keeping every other setting.
    pub fn with_bands(mut self, bands: Vec<ProbabilityBand>) -> Self {
        self.bands = bands;
        self
    }
}
