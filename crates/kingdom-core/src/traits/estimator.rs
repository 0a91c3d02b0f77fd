use crate::errors::KingdomResult;
use crate::models::{IntervalEstimate, ScenarioQuery, Tier};

/// Contract every estimator tier satisfies to plug into the router:
/// a query in, a point estimate with its interval out.
pub trait IEstimator: Send + Sync {
    fn estimate(&self, query: &ScenarioQuery) -> KingdomResult<IntervalEstimate>;

    /// Tier this estimator serves.
    fn tier(&self) -> Tier;
}
