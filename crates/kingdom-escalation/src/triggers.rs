//! Governance triggers: each one forces escalation on its own, whatever the VoI.

use kingdom_core::config::TriggerThresholds;
use kingdom_core::models::{EscalationContext, TriggerKind};

/// Every trigger that fires for `context`, in priority order.
///
/// - stakes: `severity > t.stakes_severity ∧ uncertainty > t.stakes_uncertainty`
/// - boundary: `sensitivity > t.boundary_sensitivity`
/// - novelty: `ood_risk > t.novelty_ood`
pub fn evaluate_triggers(context: &EscalationContext, thresholds: &TriggerThresholds) -> Vec<TriggerKind> {
    TriggerKind::ALL
        .into_iter()
        .filter(|kind| fires(*kind, context, thresholds))
        .collect()
}

fn fires(kind: TriggerKind, context: &EscalationContext, t: &TriggerThresholds) -> bool {
    match kind {
        TriggerKind::Stakes => {
            context.consequence_severity() > t.stakes_severity
                && context.model_uncertainty() > t.stakes_uncertainty
        }
        TriggerKind::Boundary => context.decision_sensitivity() > t.boundary_sensitivity,
        TriggerKind::Novelty => context.ood_risk() > t.novelty_ood,
    }
}
