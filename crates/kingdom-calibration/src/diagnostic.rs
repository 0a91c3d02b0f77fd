//! Coverage diagnostics: the acceptance gate for a fitted calibrator.

use kingdom_core::errors::{CalibrationError, KingdomResult};
use kingdom_core::models::CoverageDiagnostic;

/// Check a held-out set: non-empty, equal lengths.
pub(crate) fn check_test_set(features: &[Vec<f64>], actuals: &[f64]) -> KingdomResult<()> {
    if features.is_empty() {
        return Err(CalibrationError::EmptyInput {
            what: "test set".to_string(),
        }
        .into());
    }
    if features.len() != actuals.len() {
        return Err(CalibrationError::LengthMismatch {
            what: "test actuals".to_string(),
            expected: features.len(),
            actual: actuals.len(),
        }
        .into());
    }
    Ok(())
}

/// Coverage of the symmetric intervals `point ± q_hat` over `actuals`.
///
/// `points` and `actuals` have equal, non-zero length.
pub fn evaluate_coverage(
    points: &[f64],
    actuals: &[f64],
    q_hat: f64,
    target_coverage: f64,
    tolerance: f64,
) -> CoverageDiagnostic {
    let n = points.len();
    let covered = points
        .iter()
        .zip(actuals)
        .filter(|&(&p, &y)| p - q_hat <= y && y <= p + q_hat)
        .count();
    let empirical_coverage = covered as f64 / n as f64;

    CoverageDiagnostic {
        empirical_coverage,
        target_coverage,
        coverage_achieved: (empirical_coverage - target_coverage).abs() < tolerance,
        mean_interval_width: 2.0 * q_hat,
        n_test: n,
    }
}
