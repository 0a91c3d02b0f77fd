//! EscalationEngine: implements IEscalationPolicy: band lookup, VoI, and
//! governance triggers folded into one decision.

use kingdom_core::config::EscalationConfig;
use kingdom_core::errors::KingdomResult;
use kingdom_core::models::{DecisionBasis, DecisionResult, EscalationContext, IntervalEstimate};
use kingdom_core::traits::IEscalationPolicy;
use kingdom_observability::decision_span;
use kingdom_observability::tracing_setup::events;

use crate::bands::select_band;
use crate::signals::ScreeningSignals;
use crate::triggers::evaluate_triggers;
use crate::voi::VoiBreakdown;

/// Stateless escalation policy.
///
/// Holds only its validated configuration; `decide` takes `&self` and
/// touches no shared mutable state, so one engine can be scored from many
/// threads at once.
#[derive(Debug, Clone, Default)]
pub struct EscalationEngine {
    config: EscalationConfig,
}

impl EscalationEngine {
    /// Build an engine, rejecting an invalid band table or thresholds.
    pub fn new(config: EscalationConfig) -> KingdomResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EscalationConfig {
        &self.config
    }

    /// Signals the band table would see for `estimate`.
    pub fn signals(&self, estimate: &IntervalEstimate) -> ScreeningSignals {
        ScreeningSignals::from_estimate(estimate, self.config.ratio_epsilon)
    }

    /// Decide whether to escalate.
    ///
    /// Refuses malformed estimates with `MalformedEstimate`.
    /// `escalate = expected_voi > 0 ∨ any trigger fired`.
    pub fn decide(
        &self,
        context: &EscalationContext,
        estimate: &IntervalEstimate,
    ) -> KingdomResult<DecisionResult> {
        let span = decision_span!(context.consequence_severity(), context.model_uncertainty());
        let _guard = span.enter();
        estimate.validate()?;

        let signals = self.signals(estimate);
        let band = select_band(&self.config.bands, &signals)?;
        let voi = VoiBreakdown::compute(
            band.probability,
            self.config.uncertainty_reduction_factor,
            context,
        );
        let fired_triggers = evaluate_triggers(context, &self.config.triggers);
        let trigger = fired_triggers.first().copied();

        let basis = if trigger.is_some() {
            DecisionBasis::GovernanceTrigger
        } else if voi.favours_escalation() {
            DecisionBasis::PositiveValue
        } else {
            DecisionBasis::ScreeningSufficient
        };

        let decision = DecisionResult {
            expected_voi: voi.expected_voi,
            escalate: basis != DecisionBasis::ScreeningSufficient,
            trigger,
            fired_triggers,
            basis,
            band: band.name.clone(),
            p_wrong_screen: voi.p_wrong_screen,
            p_wrong_escalated: voi.p_wrong_escalated,
            loss_screen: voi.loss_screen,
            loss_escalate: voi.loss_escalate,
        };
        events::decision_made(&decision);
        Ok(decision)
    }
}

impl IEscalationPolicy for EscalationEngine {
    fn decide(
        &self,
        context: &EscalationContext,
        estimate: &IntervalEstimate,
    ) -> KingdomResult<DecisionResult> {
        EscalationEngine::decide(self, context, estimate)
    }
}
