//! ConformalCalibrator: wraps a regressor, fits split-conformal intervals,
//! and gates trust on a held-out coverage diagnostic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use kingdom_core::config::calibration_config::validate_confidence_level;
use kingdom_core::config::CalibrationConfig;
use kingdom_core::constants::MIN_CALIBRATION_SET_SIZE;
use kingdom_core::errors::{CalibrationError, KingdomError, KingdomResult};
use kingdom_core::models::{CoverageDiagnostic, IntervalEstimate};
use kingdom_core::traits::IRegressor;
use kingdom_observability::calibration_span;
use tracing::{debug, info, warn};

use crate::diagnostic::{check_test_set, evaluate_coverage};
use crate::quantile::conformal_quantile;
use crate::state::CalibrationState;

/// Split-conformal calibrator around a base regressor.
///
/// `fit` takes `&self`: the regressor and residuals are computed before the
/// write lock is taken and swapped in as one [`CalibrationState`], so
/// concurrent `predict` calls see either the old state or the new one, never
/// a mix. Versions are assigned under that lock and only increase.
pub struct ConformalCalibrator<R: IRegressor> {
    /// Unfitted template; every fit trains a fresh clone.
    base: R,
    config: CalibrationConfig,
    state: RwLock<Option<Arc<CalibrationState<R>>>>,
    next_version: AtomicU64,
    /// Highest version whose coverage diagnostic passed, 0 if none.
    accepted_version: AtomicU64,
}

impl<R: IRegressor> ConformalCalibrator<R> {
    /// Create a calibrator with the default configuration.
    pub fn new(base: R) -> Self {
        Self {
            base,
            config: CalibrationConfig::default(),
            state: RwLock::new(None),
            next_version: AtomicU64::new(1),
            accepted_version: AtomicU64::new(0),
        }
    }

    /// Create a calibrator with an explicit, validated configuration.
    pub fn with_config(base: R, config: CalibrationConfig) -> KingdomResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(base)
        })
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Train on the training set, score the disjoint calibration set, and
    /// swap in the new state.
    ///
    /// Fails with `InvalidConfiguration` when `confidence_level ∉ (0, 1)` or
    /// the calibration set has fewer than 2 examples. On any error the
    /// previous state stays in place.
    pub fn fit(
        &self,
        train_x: &[Vec<f64>],
        train_y: &[f64],
        calib_x: &[Vec<f64>],
        calib_y: &[f64],
        confidence_level: f64,
    ) -> KingdomResult<()> {
        validate_confidence_level(confidence_level)?;
        if calib_x.len() < MIN_CALIBRATION_SET_SIZE {
            return Err(KingdomError::InvalidConfiguration {
                reason: format!(
                    "calibration set needs at least {MIN_CALIBRATION_SET_SIZE} examples, got {}",
                    calib_x.len()
                ),
            });
        }
        if calib_x.len() != calib_y.len() {
            return Err(CalibrationError::LengthMismatch {
                what: "calibration targets".to_string(),
                expected: calib_x.len(),
                actual: calib_y.len(),
            }
            .into());
        }

        let span = calibration_span!(self.base.name(), calib_x.len());
        let _guard = span.enter();

        let mut regressor = self.base.clone();
        regressor.fit(train_x, train_y)?;

        let mut residuals = Vec::with_capacity(calib_x.len());
        for (x, &y) in calib_x.iter().zip(calib_y) {
            let residual = (regressor.predict(x)? - y).abs();
            if !residual.is_finite() {
                return Err(CalibrationError::NonFinite {
                    what: "calibration residuals".to_string(),
                }
                .into());
            }
            residuals.push(residual);
        }
        residuals.sort_by(f64::total_cmp);
        let q_hat = conformal_quantile(&residuals, confidence_level);

        let mut guard = self
            .state
            .write()
            .map_err(|_| KingdomError::ConcurrencyError("calibration state lock poisoned".to_string()))?;
        // Assigned under the write lock so installed versions only increase.
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        *guard = Some(Arc::new(CalibrationState {
            regressor,
            residuals,
            q_hat,
            confidence_level,
            version,
            n_training: train_x.len(),
            fitted_at: Utc::now(),
        }));
        drop(guard);

        info!(
            regressor = self.base.name(),
            version,
            q_hat,
            confidence_level,
            n_training = train_x.len(),
            n_calibration = calib_x.len(),
            "conformal calibrator fitted"
        );
        Ok(())
    }

    /// [`fit`](Self::fit) at the configured `confidence_level`.
    pub fn fit_at_configured_level(
        &self,
        train_x: &[Vec<f64>],
        train_y: &[f64],
        calib_x: &[Vec<f64>],
        calib_y: &[f64],
    ) -> KingdomResult<()> {
        self.fit(train_x, train_y, calib_x, calib_y, self.config.confidence_level)
    }

    /// Current state snapshot.
    pub fn state(&self) -> KingdomResult<Arc<CalibrationState<R>>> {
        let guard = self
            .state
            .read()
            .map_err(|_| KingdomError::ConcurrencyError("calibration state lock poisoned".to_string()))?;
        guard.clone().ok_or_else(|| CalibrationError::NotFitted.into())
    }

    /// Whether the calibrator has been fitted at least once.
    pub fn is_fitted(&self) -> bool {
        self.state().is_ok()
    }

    /// Current state snapshot, provided its coverage diagnostic has passed.
    ///
    /// Fails with `Untrusted` when the snapshot has only been fitted.
    pub fn trusted_state(&self) -> KingdomResult<Arc<CalibrationState<R>>> {
        let state = self.state()?;
        if self.accepted_version.load(Ordering::SeqCst) != state.version {
            return Err(CalibrationError::Untrusted {
                version: state.version,
            }
            .into());
        }
        Ok(state)
    }

    /// The current conformal quantile `q̂`.
    pub fn q_hat(&self) -> KingdomResult<f64> {
        Ok(self.state()?.q_hat)
    }

    /// `(point, point − q̂, point + q̂)` for each input.
    pub fn predict(&self, inputs: &[Vec<f64>]) -> KingdomResult<Vec<IntervalEstimate>> {
        let state = self.state()?;
        inputs
            .iter()
            .map(|x| interval_for(&state, x))
            .collect()
    }

    /// Calibrated interval for a single input.
    pub fn predict_one(&self, input: &[f64]) -> KingdomResult<IntervalEstimate> {
        let state = self.state()?;
        interval_for(&state, input)
    }

    /// Like [`predict_one`](Self::predict_one), but only from a state whose
    /// coverage diagnostic has passed.
    pub fn predict_one_trusted(&self, input: &[f64]) -> KingdomResult<IntervalEstimate> {
        let state = self.trusted_state()?;
        interval_for(&state, input)
    }

    /// Empirical coverage and mean width on held-out data.
    ///
    /// A passing diagnostic marks the evaluated state as trusted; see
    /// [`ConformalCalibrator::is_trusted`].
    pub fn coverage_diagnostic(
        &self,
        test_x: &[Vec<f64>],
        test_y: &[f64],
    ) -> KingdomResult<CoverageDiagnostic> {
        check_test_set(test_x, test_y)?;
        let state = self.state()?;
        let points = point_predictions(&state, test_x)?;
        let diagnostic = evaluate_coverage(
            &points,
            test_y,
            state.q_hat,
            state.confidence_level,
            self.config.coverage_tolerance,
        );

        if diagnostic.coverage_achieved {
            self.accepted_version.fetch_max(state.version, Ordering::SeqCst);
            debug!(
                version = state.version,
                empirical = diagnostic.empirical_coverage,
                "coverage diagnostic passed"
            );
        } else {
            warn!(
                version = state.version,
                empirical = diagnostic.empirical_coverage,
                target = diagnostic.target_coverage,
                "coverage diagnostic failed"
            );
        }
        Ok(diagnostic)
    }

    /// True once the current state's coverage diagnostic has passed.
    /// A re-fit resets trust until the new state is diagnosed.
    pub fn is_trusted(&self) -> bool {
        self.trusted_state().is_ok()
    }

    /// Declared-vs-empirical coverage curve over several confidence levels.
    ///
    /// Re-derives `q̂` from the stored residuals for each level; no refit.
    /// Levels default to the configured sweep when `levels` is empty.
    pub fn coverage_sweep(
        &self,
        test_x: &[Vec<f64>],
        test_y: &[f64],
        levels: &[f64],
    ) -> KingdomResult<Vec<CoverageDiagnostic>> {
        check_test_set(test_x, test_y)?;
        let levels = if levels.is_empty() {
            self.config.sweep_levels.as_slice()
        } else {
            levels
        };
        for &level in levels {
            validate_confidence_level(level)?;
        }

        let state = self.state()?;
        let points = point_predictions(&state, test_x)?;
        Ok(levels
            .iter()
            .map(|&level| {
                evaluate_coverage(
                    &points,
                    test_y,
                    state.quantile_at(level),
                    level,
                    self.config.coverage_tolerance,
                )
            })
            .collect())
    }
}

fn point_predictions<R: IRegressor>(
    state: &CalibrationState<R>,
    inputs: &[Vec<f64>],
) -> KingdomResult<Vec<f64>> {
    inputs.iter().map(|x| state.regressor.predict(x)).collect()
}

fn interval_for<R: IRegressor>(
    state: &CalibrationState<R>,
    input: &[f64],
) -> KingdomResult<IntervalEstimate> {
    let point = state.regressor.predict(input)?;
    IntervalEstimate::symmetric(point, state.q_hat)
}
