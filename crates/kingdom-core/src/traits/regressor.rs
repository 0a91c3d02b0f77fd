use crate::errors::KingdomResult;

/// A point-estimate regressor the conformal calibrator can wrap.
///
/// `Clone` lets the calibrator train a fresh copy per fit while the
/// previously fitted model keeps serving predictions.
pub trait IRegressor: Clone + Send + Sync {
    /// Train on `(features, target)` pairs.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> KingdomResult<()>;

    /// Point prediction for one feature vector.
    fn predict(&self, features: &[f64]) -> KingdomResult<f64>;

    /// Model name for logs and reports.
    fn name(&self) -> &str;
}
