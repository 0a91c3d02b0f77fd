use serde::{Deserialize, Serialize};

/// Empirical coverage of a calibrated model on held-out data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDiagnostic {
    /// Fraction of actuals inside their predicted interval.
    pub empirical_coverage: f64,
    /// Declared confidence level.
    pub target_coverage: f64,
    /// `|empirical − target| < tolerance`.
    pub coverage_achieved: bool,
    pub mean_interval_width: f64,
    pub n_test: usize,
}
