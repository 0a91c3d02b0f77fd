//! Ordinary least squares with a small ridge term, solved from the normal
//! equations `(XᵀX + λI)·β = Xᵀy` by Gaussian elimination.

use serde::{Deserialize, Serialize};

use kingdom_core::config::defaults::DEFAULT_RIDGE_LAMBDA;
use kingdom_core::config::CalibrationConfig;
use kingdom_core::errors::{CalibrationError, KingdomResult};
use kingdom_core::traits::IRegressor;

use super::check_training_set;

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Linear model `ŷ = β₀ + Σ βᵢ·xᵢ`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    ridge_lambda: f64,
    /// `[intercept, β₁, …, βₖ]` once fitted.
    coefficients: Option<Vec<f64>>,
}

impl LinearRegressor {
    pub fn new(ridge_lambda: f64) -> Self {
        Self {
            ridge_lambda,
            coefficients: None,
        }
    }

    /// Unfitted model using the configured ridge term.
    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self::new(config.ridge_lambda)
    }

    pub fn ridge_lambda(&self) -> f64 {
        self.ridge_lambda
    }

    /// Fitted `[intercept, β₁, …, βₖ]`, or `None` before `fit`.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }
}

impl Default for LinearRegressor {
    fn default() -> Self {
        Self::new(DEFAULT_RIDGE_LAMBDA)
    }
}

impl IRegressor for LinearRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> KingdomResult<()> {
        let width = check_training_set(features, targets)?;
        let dim = width + 1;

        // Accumulate XᵀX and Xᵀy over the design matrix with a leading 1 column.
        let mut xtx = vec![vec![0.0; dim]; dim];
        let mut xty = vec![0.0; dim];
        let mut row = vec![0.0; dim];
        for (x, &y) in features.iter().zip(targets) {
            row[0] = 1.0;
            row[1..].copy_from_slice(x);
            for i in 0..dim {
                xty[i] += row[i] * y;
                for j in 0..dim {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }
        for (i, r) in xtx.iter_mut().enumerate() {
            r[i] += self.ridge_lambda;
        }

        self.coefficients = Some(solve(xtx, xty)?);
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> KingdomResult<f64> {
        let beta = self.coefficients.as_ref().ok_or(CalibrationError::NotFitted)?;
        if features.len() + 1 != beta.len() {
            return Err(CalibrationError::FeatureWidthMismatch {
                expected: beta.len() - 1,
                actual: features.len(),
            }
            .into());
        }
        Ok(beta[0] + beta[1..].iter().zip(features).map(|(b, x)| b * x).sum::<f64>())
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Solve `a·x = b` with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, CalibrationError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(CalibrationError::SingularSystem { column: col });
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for r in (col + 1)..n {
            let factor = a[r][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[r][c] -= factor * a[col][c];
            }
            b[r] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|c| a[row][c] * x[c]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
