//! Exposes a calibrator as a router tier.

use std::sync::Arc;

use kingdom_core::errors::KingdomResult;
use kingdom_core::models::{IntervalEstimate, ScenarioQuery, Tier};
use kingdom_core::traits::{IEstimator, IRegressor};

use crate::calibrator::ConformalCalibrator;

/// Answers queries with the calibrator's conformal interval for the
/// query's feature vector. Shares the calibrator, so a re-fit is picked up
/// by the next query.
///
/// Only a fit whose coverage diagnostic has passed is served; otherwise
/// `estimate` fails with `CalibrationError::Untrusted`.
pub struct CalibratedEstimator<R: IRegressor> {
    calibrator: Arc<ConformalCalibrator<R>>,
    tier: Tier,
}

impl<R: IRegressor> CalibratedEstimator<R> {
    pub fn new(calibrator: Arc<ConformalCalibrator<R>>, tier: Tier) -> Self {
        Self { calibrator, tier }
    }

    pub fn calibrator(&self) -> &Arc<ConformalCalibrator<R>> {
        &self.calibrator
    }
}

impl<R: IRegressor> IEstimator for CalibratedEstimator<R> {
    fn estimate(&self, query: &ScenarioQuery) -> KingdomResult<IntervalEstimate> {
        self.calibrator.predict_one_trusted(&query.features)
    }

    fn tier(&self) -> Tier {
        self.tier
    }
}
