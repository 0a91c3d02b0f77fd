use crate::errors::KingdomResult;
use crate::models::{DecisionResult, EscalationContext, IntervalEstimate};

/// An escalation policy: a pure function of context and screening estimate.
pub trait IEscalationPolicy: Send + Sync {
    fn decide(
        &self,
        context: &EscalationContext,
        estimate: &IntervalEstimate,
    ) -> KingdomResult<DecisionResult>;
}
