use serde::{Deserialize, Serialize};

use kingdom_core::errors::{CalibrationError, KingdomResult};
use kingdom_core::traits::IRegressor;

use super::check_training_set;

/// Predicts the training-target mean for every input.
///
/// Ignores features entirely; useful as a floor and to show that conformal
/// intervals stay honest around a poor model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IRegressor for MeanRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> KingdomResult<()> {
        check_training_set(features, targets)?;
        self.mean = Some(targets.iter().sum::<f64>() / targets.len() as f64);
        Ok(())
    }

    fn predict(&self, _features: &[f64]) -> KingdomResult<f64> {
        self.mean.ok_or_else(|| CalibrationError::NotFitted.into())
    }

    fn name(&self) -> &str {
        "mean"
    }
}
