//! Base regressors the calibrator can wrap.
//!
//! | Regressor | Model |
//! |-----------|-------|
//! | [`LinearRegressor`] | Ridge-stabilised least squares with intercept |
//! | [`MeanRegressor`] | Constant: the training-target mean |

pub mod linear;
pub mod mean;

pub use linear::LinearRegressor;
pub use mean::MeanRegressor;

use kingdom_core::errors::{CalibrationError, KingdomResult};

/// Check a training set: equal lengths, non-empty, one feature width, finite.
///
/// Returns the feature width.
pub(crate) fn check_training_set(features: &[Vec<f64>], targets: &[f64]) -> KingdomResult<usize> {
    if features.is_empty() {
        return Err(CalibrationError::EmptyInput {
            what: "training set".to_string(),
        }
        .into());
    }
    if features.len() != targets.len() {
        return Err(CalibrationError::LengthMismatch {
            what: "training targets".to_string(),
            expected: features.len(),
            actual: targets.len(),
        }
        .into());
    }
    let width = features[0].len();
    for row in features {
        if row.len() != width {
            return Err(CalibrationError::FeatureWidthMismatch {
                expected: width,
                actual: row.len(),
            }
            .into());
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(CalibrationError::NonFinite {
                what: "training features".to_string(),
            }
            .into());
        }
    }
    if targets.iter().any(|v| !v.is_finite()) {
        return Err(CalibrationError::NonFinite {
            what: "training targets".to_string(),
        }
        .into());
    }
    Ok(width)
}
