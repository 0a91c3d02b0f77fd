//! TieredRouter: screening first, high fidelity only when the decision says so.

use std::sync::Mutex;

use kingdom_core::errors::{KingdomError, KingdomResult};
use kingdom_core::models::{
    DecisionResult, EscalationContext, IntervalEstimate, ScenarioQuery, Tier,
};
use kingdom_core::traits::IEstimator;
use kingdom_observability::tracing_setup::events;
use kingdom_observability::{routing_span, RoutingMetrics};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::engine::EscalationEngine;

/// Answer to one routed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedEstimate {
    pub decision_id: Uuid,
    /// Estimate from the tier that answered.
    pub estimate: IntervalEstimate,
    pub tier: Tier,
    /// The screening estimate the decision was made on.
    pub screening: IntervalEstimate,
    pub decision: DecisionResult,
}

/// Two estimator tiers and the policy between them.
pub struct TieredRouter {
    screening: Box<dyn IEstimator>,
    high_fidelity: Box<dyn IEstimator>,
    engine: EscalationEngine,
    metrics: Mutex<RoutingMetrics>,
}

impl TieredRouter {
    /// Fails with `InvalidConfiguration` when an estimator reports the wrong tier.
    pub fn new(
        screening: Box<dyn IEstimator>,
        high_fidelity: Box<dyn IEstimator>,
        engine: EscalationEngine,
    ) -> KingdomResult<Self> {
        for (estimator, expected) in [(&screening, Tier::Screening), (&high_fidelity, Tier::HighFidelity)] {
            if estimator.tier() != expected {
                return Err(KingdomError::InvalidConfiguration {
                    reason: format!(
                        "estimator in the {expected} slot reports tier {}",
                        estimator.tier()
                    ),
                });
            }
        }
        Ok(Self {
            screening,
            high_fidelity,
            engine,
            metrics: Mutex::new(RoutingMetrics::new()),
        })
    }

    pub fn engine(&self) -> &EscalationEngine {
        &self.engine
    }

    /// Screen, decide, and escalate when the decision says so.
    pub fn route(
        &self,
        query: &ScenarioQuery,
        context: &EscalationContext,
    ) -> KingdomResult<RoutedEstimate> {
        let span = routing_span!(query.scenario_id, query.time_horizon);
        let _guard = span.enter();

        let screening = self.run_tier(self.screening.as_ref(), query)?;
        let decision = self.engine.decide(context, &screening)?;

        let (estimate, tier) = if decision.escalate {
            events::tier_escalated(&query.scenario_id, decision.reason_label());
            (
                self.run_tier(self.high_fidelity.as_ref(), query)?,
                Tier::HighFidelity,
            )
        } else {
            (screening, Tier::Screening)
        };

        self.with_metrics(|m| m.record(&decision))?;
        let decision_id = Uuid::new_v4();
        debug!(%decision_id, %tier, "query routed");

        Ok(RoutedEstimate {
            decision_id,
            estimate,
            tier,
            screening,
            decision,
        })
    }

    /// Snapshot of the routing metrics so far.
    pub fn metrics(&self) -> KingdomResult<RoutingMetrics> {
        self.with_metrics(|m| m.clone())
    }

    fn run_tier(&self, estimator: &dyn IEstimator, query: &ScenarioQuery) -> KingdomResult<IntervalEstimate> {
        let result = estimator
            .estimate(query)
            .and_then(|estimate| estimate.validate().map(|()| estimate));
        result.or_else(|e| {
            self.with_metrics(|m| m.record_tier_failure())?;
            Err(KingdomError::TierFailure {
                tier: estimator.tier().to_string(),
                reason: e.to_string(),
            })
        })
    }

    fn with_metrics<T>(&self, f: impl FnOnce(&mut RoutingMetrics) -> T) -> KingdomResult<T> {
        let mut guard = self
            .metrics
            .lock()
            .map_err(|_| KingdomError::ConcurrencyError("routing metrics lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}
