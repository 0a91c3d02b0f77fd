//! # kingdom-calibration
//!
//! Split conformal prediction around any [`IRegressor`](kingdom_core::traits::IRegressor).
//!
//! 1. Fit the base regressor on the training set.
//! 2. Score the **disjoint** calibration set: `s_i = |ŷ_i − y_i|`.
//! 3. `q̂` = the `⌈(n+1)·c⌉`-th smallest score for confidence level `c`.
//! 4. Predict `[ŷ − q̂, ŷ + q̂]`.
//!
//! Under exchangeability the interval covers the truth with probability at
//! least `c`, however poor the base regressor is: a bad fit only widens `q̂`.
//!
//! A fitted calibrator is not trusted until
//! [`ConformalCalibrator::coverage_diagnostic`] passes on held-out data.

pub mod calibrator;
pub mod diagnostic;
pub mod estimator;
pub mod quantile;
pub mod regressors;
pub mod state;

pub use calibrator::ConformalCalibrator;
pub use estimator::CalibratedEstimator;
pub use quantile::conformal_quantile;
pub use regressors::{LinearRegressor, MeanRegressor};
pub use state::CalibrationState;
