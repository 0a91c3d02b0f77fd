//! Immutable result of one `fit` call.

use chrono::{DateTime, Utc};

use kingdom_core::traits::IRegressor;

use crate::quantile::conformal_quantile;

/// Fitted regressor plus the sorted calibration residuals it was scored on.
///
/// Never mutated after construction. A re-fit builds a new state and swaps
/// it in whole.
#[derive(Debug, Clone)]
pub struct CalibrationState<R: IRegressor> {
    pub regressor: R,
    /// Absolute calibration residuals, sorted ascending.
    pub residuals: Vec<f64>,
    /// Conformal quantile at `confidence_level`.
    pub q_hat: f64,
    pub confidence_level: f64,
    /// Starts at 1 and increases with every successful fit.
    pub version: u64,
    pub n_training: usize,
    pub fitted_at: DateTime<Utc>,
}

impl<R: IRegressor> CalibrationState<R> {
    pub fn n_calibration(&self) -> usize {
        self.residuals.len()
    }

    /// Quantile the same residuals would give at another confidence level.
    pub fn quantile_at(&self, confidence_level: f64) -> f64 {
        conformal_quantile(&self.residuals, confidence_level)
    }
}
